use crate::state::AppState;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdSchedule;

#[component]
pub fn Header(state: Signal<AppState>) -> Element {
    let server_url = state.read().config.server_url.clone();

    rsx! {
        div { class: "header",
            Icon {
                width: 28,
                height: 28,
                icon: MdSchedule
            }
            h1 { "Cronmon Dashboard" }
            span { class: "server-url", "{server_url}" }
        }
    }
}
