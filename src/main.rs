mod app;
mod components;
mod dashboard;
mod modal;
mod state;

use dashboard::{WindowState, get_config_path, load_config, save_config};
use dioxus::desktop::tao::dpi::LogicalSize;
use dioxus::desktop::{Config, WindowBuilder};
use tracing::{error, info};

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    // Default to info level if RUST_LOG not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    configure_logging();

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config, using defaults: {}", e);
            Default::default()
        }
    };

    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match save_config(&config) {
            Ok(()) => info!(path = %path.display(), "wrote default config"),
            Err(e) => error!("Failed to write default config: {}", e),
        }
    }

    let window = config.window.clone().unwrap_or_default();
    let window_builder = WindowBuilder::new()
        .with_title("Cronmon Dashboard")
        .with_inner_size(LogicalSize::new(
            window.width.max(WindowState::MIN_WIDTH) as f64,
            window.height.max(WindowState::MIN_HEIGHT) as f64,
        ))
        .with_min_inner_size(LogicalSize::new(
            WindowState::MIN_WIDTH as f64,
            WindowState::MIN_HEIGHT as f64,
        ));

    info!(server = %config.server_url, "starting dashboard");

    dioxus::LaunchBuilder::new()
        .with_cfg(Config::new().with_menu(None).with_window(window_builder))
        .with_context(config)
        .launch(app::App);
}
