use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn TaskTable(state: Signal<AppState>, on_delete: EventHandler<usize>) -> Element {
    let (tasks, is_loading, is_searching) = {
        let state = state.read();
        (
            state.page.tasks.clone(),
            state.is_loading,
            state.search.is_some(),
        )
    };

    if tasks.is_empty() {
        return rsx! {
            div { class: "section empty-state",
                if is_loading {
                    "Loading tasks..."
                } else if is_searching {
                    "No tasks match the search"
                } else {
                    "No monitored tasks"
                }
            }
        };
    }

    rsx! {
        div { class: "section",
            table { class: "task-table",
                thead {
                    tr {
                        th { "Name" }
                        th { "Business" }
                        th { "Period" }
                        th { "Grace (min)" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    for (index, task) in tasks.into_iter().enumerate() {
                        tr { key: "{index}",
                            class: if task.warning { "warning" } else { "" },
                            td { "{task.name}" }
                            td { "{task.business_name}" }
                            td { code { "{task.period}" } }
                            td { "{task.grace_time}" }
                            td { {task.status_label()} }
                            td {
                                button {
                                    class: "secondary danger modal-trigger",
                                    disabled: is_loading || !task.is_deletable(),
                                    title: if task.is_deletable() { "" } else { "Task id unknown" },
                                    onclick: move |_| on_delete.call(index),
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
