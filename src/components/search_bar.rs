use crate::dashboard::{SearchField, TaskSearch};
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn SearchBar(
    state: Signal<AppState>,
    on_search: EventHandler<TaskSearch>,
    on_clear: EventHandler<()>,
) -> Element {
    let mut field = use_signal(SearchField::default);
    let mut keyword = use_signal(String::new);

    let (is_loading, is_searching) = {
        let state = state.read();
        (state.is_loading, state.search.is_some())
    };
    let selected = field().param();
    let search = TaskSearch::new(field(), keyword());

    rsx! {
        div { class: "section search-bar",
            select {
                value: selected,
                disabled: is_loading,
                onchange: move |evt: Event<FormData>| {
                    if let Some(selected) = SearchField::from_param(&evt.value()) {
                        field.set(selected);
                    }
                },
                for option_field in SearchField::ALL {
                    option { value: option_field.param(), {option_field.label()} }
                }
            }
            input {
                r#type: "text",
                placeholder: "Keyword",
                value: "{keyword}",
                disabled: is_loading,
                oninput: move |evt| keyword.set(evt.value())
            }
            button {
                class: "primary",
                disabled: is_loading || search.is_none(),
                onclick: move |_| {
                    if let Some(search) = search.clone() {
                        on_search.call(search);
                    }
                },
                "Search"
            }
            if is_searching {
                button {
                    class: "secondary",
                    disabled: is_loading,
                    onclick: move |_| {
                        keyword.set(String::new());
                        on_clear.call(());
                    },
                    "Show all"
                }
            }
        }
    }
}
