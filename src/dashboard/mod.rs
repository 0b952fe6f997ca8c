pub mod client;
pub mod config;
pub mod types;

pub use client::DashboardClient;
pub use config::{get_config_path, load_config, save_config};
pub use types::{AppConfig, SearchField, TaskPage, TaskRow, TaskSearch, WindowState};
