use crate::modal::TriggerData;
use serde::{Deserialize, Serialize};

pub const DELETE_ACTION: &str = "del";

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
}

impl WindowState {
    pub const MIN_WIDTH: u32 = 640;
    pub const MIN_HEIGHT: u32 = 420;
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: 960,
            height: 640,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub api_username: String,
    pub api_password: String,
    pub items_per_page: u32,
    pub task_list_path: String,
    pub window: Option<WindowState>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            api_username: String::new(),
            api_password: String::new(),
            items_per_page: 10,
            task_list_path: "/tasklist".to_string(),
            window: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    pub fn task_list_url(&self) -> String {
        format!("{}{}", self.base_url(), self.task_list_path)
    }
}

/// One monitored cron task as reported by the server.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TaskRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub bid: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub grace_time: i64,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default)]
    pub business_name: String,
}

impl TaskRow {
    pub fn status_label(&self) -> &'static str {
        match (self.status, self.warning) {
            (false, _) => "Disabled",
            (true, true) => "Warning",
            (true, false) => "OK",
        }
    }

    /// The server only deletes by id, so rows without one cannot be deleted.
    pub fn is_deletable(&self) -> bool {
        self.id.is_some()
    }

    pub fn trigger(&self, config: &AppConfig) -> TriggerData {
        let mut trigger = TriggerData::new()
            .with_href(config.task_list_url())
            .with_action(DELETE_ACTION)
            .with_name(self.name.clone());
        if let Some(id) = self.id {
            trigger = trigger.with_id(id.to_string());
        }
        if let Some(bid) = self.bid {
            trigger = trigger.with_bid(bid.to_string());
        }
        trigger
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum SearchField {
    #[default]
    TaskName,
    BusinessName,
    Url,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [
        SearchField::TaskName,
        SearchField::BusinessName,
        SearchField::Url,
    ];

    /// Query parameter understood by `/api/1.0/tasks`.
    pub fn param(&self) -> &'static str {
        match self {
            SearchField::TaskName => "taskname",
            SearchField::BusinessName => "bizname",
            SearchField::Url => "url",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.param() == param)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchField::TaskName => "Task name",
            SearchField::BusinessName => "Business",
            SearchField::Url => "Monitor URL",
        }
    }
}

/// A single-keyword task lookup; the server rejects more than one keyword.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TaskSearch {
    pub field: SearchField,
    pub keyword: String,
}

impl TaskSearch {
    /// Returns `None` for a blank keyword.
    pub fn new(field: SearchField, keyword: impl Into<String>) -> Option<Self> {
        let keyword = keyword.into().trim().to_string();
        if keyword.is_empty() {
            return None;
        }
        Some(Self { field, keyword })
    }
}

#[derive(Clone, PartialEq, Deserialize, Default, Debug)]
pub struct TaskSearchResults {
    #[serde(default)]
    pub tasks: Vec<TaskRow>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Default, Debug)]
pub struct TaskPage {
    #[serde(default)]
    pub tasks: Vec<TaskRow>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(skip)]
    pub page: u32,
    #[serde(skip)]
    pub length: u32,
}

impl TaskPage {
    pub fn empty(page: u32, length: u32) -> Self {
        Self {
            page,
            length,
            ..Default::default()
        }
    }

    pub fn from_search(tasks: Vec<TaskRow>) -> Self {
        let count = tasks.len() as u64;
        Self {
            length: tasks.len().max(1) as u32,
            tasks,
            count,
            page: 1,
            ..Default::default()
        }
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn total_pages(&self) -> u64 {
        if self.length == 0 {
            return 0;
        }
        self.count.div_ceil(self.length as u64)
    }
}
