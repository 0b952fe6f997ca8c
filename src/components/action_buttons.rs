use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn ActionButtons(
    state: Signal<AppState>,
    on_prev: EventHandler<()>,
    on_next: EventHandler<()>,
    on_refresh: EventHandler<()>,
) -> Element {
    let (is_loading, has_prev, has_next, page, total_pages) = {
        let state = state.read();
        (
            state.is_loading,
            state.page.has_prev(),
            state.page.has_next(),
            state.page.page,
            state.page.total_pages().max(1),
        )
    };

    rsx! {
        div { class: "button-group",
            button {
                class: "secondary",
                disabled: is_loading || !has_prev,
                onclick: move |_| on_prev.call(()),
                "Previous"
            }
            span { class: "page-indicator", "Page {page} / {total_pages}" }
            button {
                class: "secondary",
                disabled: is_loading || !has_next,
                onclick: move |_| on_next.call(()),
                "Next"
            }
            button {
                class: "primary",
                disabled: is_loading,
                onclick: move |_| on_refresh.call(()),
                if is_loading { "Loading..." } else { "Refresh" }
            }
        }
    }
}
