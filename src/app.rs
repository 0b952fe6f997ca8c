use crate::components::*;
use crate::dashboard::{AppConfig, DashboardClient, TaskSearch};
use crate::modal::{PageEffect, apply_effect, submit};
use crate::state::{AppState, Message};
use dioxus::prelude::*;
use std::rc::Rc;
use tracing::{error, info};

#[allow(non_snake_case)]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let mut state = use_signal({
        let config = config.clone();
        move || AppState::new(config)
    });
    let client: Option<Rc<DashboardClient>> =
        use_hook(move || match DashboardClient::new(config) {
            Ok(client) => Some(Rc::new(client)),
            Err(e) => {
                error!("Failed to create HTTP client: {}", e);
                None
            }
        });

    use_effect({
        let client = client.clone();
        move || {
            let client = client.clone();
            spawn(async move {
                initialize_app(state, client).await;
            });
        }
    });

    let on_delete = move |index: usize| {
        let trigger = {
            let read_state = state.read();
            read_state
                .task(index)
                .map(|task| task.trigger(&read_state.config))
        };

        if let Some(trigger) = trigger {
            state.write().open_confirm(&trigger);
        }
    };

    let on_confirm = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move {
                confirm_pending(state, client).await;
            });
        }
    };

    let on_cancel = {
        let client = client.clone();
        move |_| {
            let effect = state.write().cancel();
            if let Some(effect) = effect {
                let client = client.clone();
                spawn(async move {
                    run_effect(state, client, effect).await;
                });
            }
        }
    };

    let on_refresh = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move {
                run_effect(state, client, PageEffect::Reload { bypass_cache: true })
                    .await;
            });
        }
    };

    let on_prev = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move {
                change_page(state, client, -1).await;
            });
        }
    };

    let on_next = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move {
                change_page(state, client, 1).await;
            });
        }
    };

    let on_search = {
        let client = client.clone();
        move |search: TaskSearch| {
            let client = client.clone();
            spawn(async move {
                search_tasks(state, client, search).await;
            });
        }
    };

    let on_clear_search = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move {
                clear_search(state, client).await;
            });
        }
    };

    rsx! {
        style { {include_str!("../assets/main.css")} }
        div { class: "app-container",
            Header { state: state }
            div { class: "content",
                SearchBar {
                    state: state,
                    on_search: on_search,
                    on_clear: on_clear_search
                }
                TaskTable {
                    state: state,
                    on_delete: on_delete
                }
                ActionButtons {
                    state: state,
                    on_prev: on_prev,
                    on_next: on_next,
                    on_refresh: on_refresh
                }
            }
            StatusBar { state: state }
            ConfirmModal {
                state: state,
                on_confirm: on_confirm,
                on_cancel: on_cancel
            }
        }
    }
}

async fn initialize_app(mut state: Signal<AppState>, client: Option<Rc<DashboardClient>>) {
    state.write().clear_message();

    let Some(client) = client else {
        state
            .write()
            .set_message(Message::error("HTTP client is unavailable"));
        return;
    };

    let length = state.read().page.length;
    load_page(state, &client, 1, length).await;
}

async fn load_page(
    mut state: Signal<AppState>,
    client: &DashboardClient,
    page: u32,
    length: u32,
) {
    state.write().set_loading(true);
    let result = client.load_page(page, length, false).await;
    state.write().set_loading(false);

    match result {
        Ok(task_page) => {
            state.write().set_page(task_page);
        }
        Err(e) => {
            state
                .write()
                .set_message(Message::error(format!("Failed to load tasks: {}", e)));
        }
    }
}

async fn change_page(
    mut state: Signal<AppState>,
    client: Option<Rc<DashboardClient>>,
    step: i64,
) {
    let Some(client) = client else {
        return;
    };

    let (page, length) = {
        let read_state = state.read();
        (read_state.page.page, read_state.page.length)
    };
    let target = (page as i64 + step).max(1) as u32;

    state.write().clear_message();
    load_page(state, &client, target, length).await;
}

async fn search_tasks(
    mut state: Signal<AppState>,
    client: Option<Rc<DashboardClient>>,
    search: TaskSearch,
) {
    let Some(client) = client else {
        return;
    };

    {
        let mut write_state = state.write();
        write_state.clear_message();
        write_state.set_loading(true);
    }
    let result = client.search(&search).await;
    state.write().set_loading(false);

    match result {
        Ok(task_page) => {
            info!(field = search.field.param(), count = task_page.count, "task search");
            let mut write_state = state.write();
            write_state.set_page(task_page);
            write_state.set_search(Some(search));
        }
        Err(e) => {
            state
                .write()
                .set_message(Message::error(format!("Search failed: {}", e)));
        }
    }
}

async fn clear_search(mut state: Signal<AppState>, client: Option<Rc<DashboardClient>>) {
    let Some(client) = client else {
        return;
    };

    let length = {
        let mut write_state = state.write();
        write_state.set_search(None);
        write_state.clear_message();
        write_state.config.items_per_page.max(1)
    };
    load_page(state, &client, 1, length).await;
}

async fn confirm_pending(mut state: Signal<AppState>, client: Option<Rc<DashboardClient>>) {
    let form = state.write().confirm();
    let Some(form) = form else {
        return;
    };

    let Some(client) = client else {
        state.write().close();
        state
            .write()
            .set_message(Message::error("HTTP client is unavailable"));
        return;
    };

    {
        let mut write_state = state.write();
        write_state.clear_message();
        write_state.set_loading(true);
    }

    let result = submit(client.as_ref(), &form).await;

    let effect = {
        let mut write_state = state.write();
        write_state.set_loading(false);
        write_state.close()
    };

    match result {
        Ok(outcome) => {
            state.write().set_message(Message::for_submission(&outcome));
        }
        Err(e) => {
            // Failed navigation leaves the current page as it was.
            state
                .write()
                .set_message(Message::error(format!("Failed to submit request: {}", e)));
            return;
        }
    }

    if let Some(effect) = effect {
        run_effect(state, Some(client), effect).await;
    }
}

async fn run_effect(
    mut state: Signal<AppState>,
    client: Option<Rc<DashboardClient>>,
    effect: PageEffect,
) {
    let Some(client) = client else {
        return;
    };

    state.write().set_loading(true);
    let result = apply_effect(client.as_ref(), effect).await;
    state.write().set_loading(false);

    match result {
        Ok(_) => {
            if let Some(task_page) = client.last_page() {
                info!(count = task_page.count, "page reloaded");
                state.write().set_page(task_page);
            }
        }
        Err(e) => {
            state
                .write()
                .set_message(Message::error(format!("Failed to reload tasks: {}", e)));
        }
    }
}
