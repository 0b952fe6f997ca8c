use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn ConfirmModal(
    state: Signal<AppState>,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let (is_open, label, is_loading) = {
        let state = state.read();
        (
            state.modal.is_open(),
            state.label.content().to_string(),
            state.is_loading,
        )
    };

    if !is_open {
        return rsx! {};
    }

    rsx! {
        div { class: "dialog-overlay", id: "confirm-modal-post",
            div { class: "delete-confirm-dialog",
                h3 { "Delete Task" }
                p {
                    "Are you sure you want to delete \""
                    span { id: "modal-body-name", "{label}" }
                    "\"?"
                }
                div { class: "dialog-buttons",
                    button {
                        class: "secondary",
                        disabled: is_loading,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "primary danger btn-ok",
                        disabled: is_loading,
                        onclick: move |_| on_confirm.call(()),
                        if is_loading { "Deleting..." } else { "Delete" }
                    }
                }
            }
        }
    }
}
