use crate::dashboard::{AppConfig, TaskPage, TaskRow, TaskSearch};
use crate::modal::{
    FormSubmission, LabelSlot, ModalController, NavigationOutcome, PageEffect, TriggerData,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub page: TaskPage,
    pub modal: ModalController,
    pub label: LabelSlot,
    pub search: Option<TaskSearch>,
    pub message: Option<Message>,
    pub is_loading: bool,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub text: String,
    pub is_error: bool,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// Reports a completed submission. The body is never read, so a redirect
    /// (typically to a login page) is the only hint that nothing was deleted.
    pub fn for_submission(outcome: &NavigationOutcome) -> Self {
        if outcome.status >= 400 {
            Self::error(format!(
                "Server rejected the request (HTTP {})",
                outcome.status
            ))
        } else if outcome.redirected {
            Self::error(format!(
                "Request was redirected to {} (HTTP {}); the server may require a login",
                outcome.location, outcome.status
            ))
        } else {
            Self::success(format!("Request sent (HTTP {})", outcome.status))
        }
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let length = config.items_per_page.max(1);
        Self {
            config,
            page: TaskPage::empty(1, length),
            modal: ModalController::new(),
            label: LabelSlot::new(),
            search: None,
            message: None,
            is_loading: false,
        }
    }

    pub fn set_message(&mut self, message: Message) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_page(&mut self, page: TaskPage) {
        self.page = page;
    }

    pub fn set_search(&mut self, search: Option<TaskSearch>) {
        self.search = search;
    }

    pub fn task(&self, index: usize) -> Option<&TaskRow> {
        self.page.tasks.get(index)
    }

    /// A trigger click: the label is copied, then the dialog opens on the trigger.
    pub fn open_confirm(&mut self, trigger: &TriggerData) {
        self.label.propagate(trigger);
        self.modal.show(trigger);
    }

    pub fn confirm(&mut self) -> Option<FormSubmission> {
        self.modal.confirm()
    }

    pub fn cancel(&mut self) -> Option<PageEffect> {
        self.modal.cancel();
        self.modal.hidden()
    }

    pub fn close(&mut self) -> Option<PageEffect> {
        self.modal.hidden()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::new())
    }
}
