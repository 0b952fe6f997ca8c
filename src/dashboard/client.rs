use crate::dashboard::types::{
    AppConfig, SearchField, TaskPage, TaskRow, TaskSearch, TaskSearchResults,
};
use crate::modal::{FormSubmission, HttpMethod, NavigationOutcome, Navigator};
use reqwest::Url;
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use thiserror::Error;
use tracing::{debug, info, warn};

const TASKS_ENDPOINT: &str = "/api/1.0/tasks/all";
const TASK_SEARCH_ENDPOINT: &str = "/api/1.0/tasks";
const NO_RECORDS: &str = "No Records";
const OUT_OF_RANGE: &str = "Out of Range";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server error ({status}) {error}: {message}")]
    Server {
        status: u16,
        error: String,
        message: String,
    },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PageRequest {
    pub page: u32,
    pub length: u32,
}

/// What the window is currently showing; a reload repeats it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CurrentView {
    Page(PageRequest),
    Search(TaskSearch),
}

/// Talks to the cronmon server on behalf of the dashboard window.
pub struct DashboardClient {
    http: reqwest::Client,
    config: AppConfig,
    current: RefCell<CurrentView>,
    last_page: RefCell<Option<TaskPage>>,
}

impl DashboardClient {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        let current = CurrentView::Page(PageRequest {
            page: 1,
            length: config.items_per_page.max(1),
        });

        Ok(Self {
            http,
            config,
            current: RefCell::new(current),
            last_page: RefCell::new(None),
        })
    }

    #[cfg(test)]
    pub fn current_view(&self) -> CurrentView {
        self.current.borrow().clone()
    }

    pub fn last_page(&self) -> Option<TaskPage> {
        self.last_page.borrow().clone()
    }

    /// Resolves a form `action` the way a page does: relative to the task list,
    /// with an empty action meaning the task list itself.
    fn resolve(&self, action: &str) -> Result<Url> {
        let document = self.config.task_list_url();
        let base = Url::parse(&document).map_err(|_| ClientError::InvalidUrl(document.clone()))?;
        base.join(action)
            .map_err(|_| ClientError::InvalidUrl(action.to_string()))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.config.api_username.is_empty() {
            return request;
        }
        request.basic_auth(&self.config.api_username, Some(&self.config.api_password))
    }

    /// Sends an API request. `Ok(None)` is the server's "No Records" answer.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            if status == reqwest::StatusCode::BAD_REQUEST && body.message == NO_RECORDS {
                return Ok(None);
            }
            return Err(ClientError::Server {
                status: status.as_u16(),
                error: body.error,
                message: body.message,
            });
        }

        Ok(Some(response.json().await?))
    }

    /// Loads one page of tasks and makes it the current page.
    /// Stepping past the last page (e.g. after a delete) falls back to the page before it.
    pub async fn load_page(
        &self,
        page: u32,
        length: u32,
        bypass_cache: bool,
    ) -> Result<TaskPage> {
        let mut page = page.max(1);
        let length = length.max(1);

        loop {
            *self.current.borrow_mut() = CurrentView::Page(PageRequest { page, length });
            match self.fetch_tasks(page, length, bypass_cache).await {
                Err(ClientError::Server { message, .. })
                    if message == OUT_OF_RANGE && page > 1 =>
                {
                    debug!(page, "page out of range, stepping back");
                    page -= 1;
                }
                Ok(task_page) => {
                    *self.last_page.borrow_mut() = Some(task_page.clone());
                    return Ok(task_page);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_tasks(&self, page: u32, length: u32, bypass_cache: bool) -> Result<TaskPage> {
        let url = format!("{}{}", self.config.base_url(), TASKS_ENDPOINT);
        let mut request = self
            .http
            .get(&url)
            .query(&[("page", page.to_string()), ("length", length.to_string())]);
        if bypass_cache {
            request = request.header(CACHE_CONTROL, "no-cache");
        }

        let Some(mut task_page) = self.send_json::<TaskPage>(request).await? else {
            return Ok(TaskPage::empty(page, length));
        };
        task_page.page = page;
        task_page.length = length;
        self.fill_row_ids(&mut task_page.tasks).await;
        Ok(task_page)
    }

    /// The full listing leaves out `id` and `bid`; look each row up by its monitor URL.
    async fn fill_row_ids(&self, rows: &mut [TaskRow]) {
        for row in rows.iter_mut().filter(|r| r.id.is_none() && !r.url.is_empty()) {
            let Some(search) = TaskSearch::new(SearchField::Url, &row.url) else {
                continue;
            };
            match self.search_tasks(&search).await {
                Ok(found) => {
                    if let Some(task) = found.into_iter().find(|t| t.url == row.url) {
                        row.id = task.id;
                        row.bid = task.bid;
                    }
                }
                Err(e) => warn!(task = %row.name, "Failed to resolve task id: {}", e),
            }
        }
    }

    /// Runs a single-keyword lookup against the task search endpoint.
    pub async fn search_tasks(&self, search: &TaskSearch) -> Result<Vec<TaskRow>> {
        let url = format!("{}{}", self.config.base_url(), TASK_SEARCH_ENDPOINT);
        let request = self
            .http
            .get(&url)
            .query(&[(search.field.param(), search.keyword.as_str())]);

        let results = self.send_json::<TaskSearchResults>(request).await?;
        Ok(results.map(|r| r.tasks).unwrap_or_default())
    }

    /// Shows search results in place of the paged listing.
    pub async fn search(&self, search: &TaskSearch) -> Result<TaskPage> {
        *self.current.borrow_mut() = CurrentView::Search(search.clone());
        let task_page = TaskPage::from_search(self.search_tasks(search).await?);
        *self.last_page.borrow_mut() = Some(task_page.clone());
        Ok(task_page)
    }
}

impl Navigator for DashboardClient {
    type Error = ClientError;

    async fn submit(&self, form: &FormSubmission) -> Result<NavigationOutcome> {
        let url = self.resolve(&form.action)?;
        let pairs = form.pairs();
        let request = match form.method {
            HttpMethod::Post => self.http.post(url.clone()).form(&pairs),
            HttpMethod::Get => self.http.get(url.clone()).query(&pairs),
        };

        let response = self.authorize(request).send().await?;
        let status = response.status().as_u16();
        let location = response.url().clone();
        let redirected = location.path() != url.path() || location.host() != url.host();
        info!(status, %location, redirected, "form submitted");

        Ok(NavigationOutcome {
            status,
            location: location.to_string(),
            redirected,
        })
    }

    async fn reload(&self, bypass_cache: bool) -> Result<NavigationOutcome> {
        let view = self.current.borrow().clone();
        match view {
            CurrentView::Page(PageRequest { page, length }) => {
                self.load_page(page, length, bypass_cache).await?;
            }
            CurrentView::Search(search) => {
                self.search(&search).await?;
            }
        }
        Ok(NavigationOutcome::direct(200, self.config.task_list_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::{ModalController, TriggerData, apply_effect};
    use axum::Router;
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, Method, StatusCode, Uri};
    use axum::response::{IntoResponse, Redirect, Response};
    use axum::routing::{get, post};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Debug)]
    struct Captured {
        method: Method,
        path: String,
        query: Option<String>,
        body: String,
        cache_control: Option<String>,
        authorized: bool,
    }

    struct ServerState {
        requests: Mutex<Vec<Captured>>,
        total: usize,
    }

    fn capture(
        state: &ServerState,
        method: Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: String,
    ) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        };
        state.requests.lock().unwrap().push(Captured {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(|q| q.to_string()),
            body,
            cache_control: header("cache-control"),
            authorized: header("authorization").is_some(),
        });
    }

    fn bad_request(message: &str) -> Response {
        let body = serde_json::json!({"error": "Bad Request", "message": message});
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }

    /// Task JSON as the server renders it; only the search endpoint includes ids.
    fn task_json(i: usize, with_ids: bool) -> serde_json::Value {
        let mut task = serde_json::json!({
            "name": format!("task-{}", i),
            "url": format!("uuid-{}", i),
            "period": "*/5 * * * *",
            "grace_time": 1,
            "status": true,
            "warning": false,
            "business_name": "ops"
        });
        if with_ids {
            task["id"] = serde_json::json!(100 + i);
            task["bid"] = serde_json::json!(7);
        }
        task
    }

    async fn task_list(
        State(state): State<Arc<ServerState>>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> &'static str {
        capture(&state, method, &uri, &headers, body);
        "<html>task list</html>"
    }

    async fn login_required(
        State(state): State<Arc<ServerState>>,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> Redirect {
        capture(&state, Method::POST, &uri, &headers, body);
        Redirect::to("/login")
    }

    async fn tasks_all(
        State(state): State<Arc<ServerState>>,
        uri: Uri,
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        capture(&state, Method::GET, &uri, &headers, String::new());

        let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let length: usize = params.get("length").and_then(|l| l.parse().ok()).unwrap_or(10);

        if state.total == 0 {
            return bad_request("No Records");
        }
        if page > state.total.div_ceil(length) {
            return bad_request("Out of Range");
        }

        let tasks: Vec<_> = ((page - 1) * length..(page * length).min(state.total))
            .map(|i| task_json(i, false))
            .collect();
        let next = (page * length < state.total).then(|| format!("page={}", page + 1));
        let prev = (page > 1).then(|| format!("page={}", page - 1));

        axum::Json(serde_json::json!({
            "tasks": tasks,
            "prev": prev,
            "next": next,
            "count": state.total
        }))
        .into_response()
    }

    async fn tasks_filter(
        State(state): State<Arc<ServerState>>,
        uri: Uri,
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        capture(&state, Method::GET, &uri, &headers, String::new());

        if params.len() != 1 {
            return bad_request("Only One Keyword Allowed");
        }
        let (key, value) = params.iter().next().unwrap();
        if value == "forbidden" {
            let body = serde_json::json!({"error": "Forbidden", "message": "Active user only"});
            return (StatusCode::FORBIDDEN, axum::Json(body)).into_response();
        }

        let tasks: Vec<_> = (0..state.total)
            .filter(|i| match key.as_str() {
                "taskname" => *value == format!("task-{}", i),
                "url" => *value == format!("uuid-{}", i),
                "bizname" => value == "ops",
                _ => false,
            })
            .map(|i| task_json(i, true))
            .collect();

        if tasks.is_empty() {
            return bad_request("No Records");
        }
        axum::Json(serde_json::json!({ "tasks": tasks })).into_response()
    }

    async fn spawn_server(total: usize) -> (String, Arc<ServerState>) {
        let state = Arc::new(ServerState {
            requests: Mutex::new(Vec::new()),
            total,
        });
        let app = Router::new()
            .route("/tasklist", get(task_list).post(task_list))
            .route("/guarded", post(login_required))
            .route("/login", get(task_list))
            .route("/api/1.0/tasks/all", get(tasks_all))
            .route("/api/1.0/tasks", get(tasks_filter))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), state)
    }

    fn config_for(server_url: String) -> AppConfig {
        AppConfig {
            server_url,
            api_username: "ops".to_string(),
            api_password: "secret".to_string(),
            items_per_page: 2,
            ..AppConfig::new()
        }
    }

    fn client_for(server_url: String) -> DashboardClient {
        DashboardClient::new(config_for(server_url)).unwrap()
    }

    fn requests_to(state: &ServerState, path: &str) -> Vec<Captured> {
        state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn test_post_submission_wire_format() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url.clone());
        let form = FormSubmission::new(format!("{}/tasklist", url), HttpMethod::Post)
            .field("id", Some("7".to_string()))
            .field("bid", None)
            .field("action", Some("del".to_string()));

        let outcome = client.submit(&form).await.unwrap();

        assert_eq!(outcome.status, 200);
        assert!(!outcome.redirected);
        let captured = requests_to(&state, "/tasklist");
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].method, Method::POST);
        assert_eq!(captured[0].body, "id=7&bid=&action=del");
        assert!(captured[0].authorized);
    }

    #[tokio::test]
    async fn test_get_submission_uses_query() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url);
        let form = FormSubmission::new("/tasklist", HttpMethod::Get)
            .field("tag", Some("a b".to_string()))
            .field("tag", Some("c".to_string()));

        client.submit(&form).await.unwrap();

        let captured = requests_to(&state, "/tasklist");
        assert_eq!(captured[0].method, Method::GET);
        assert_eq!(captured[0].query.as_deref(), Some("tag=a+b&tag=c"));
        assert_eq!(captured[0].body, "");
    }

    #[tokio::test]
    async fn test_empty_action_targets_task_list() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url);

        let outcome = client
            .submit(&FormSubmission::new("", HttpMethod::Post))
            .await
            .unwrap();

        assert_eq!(outcome.status, 200);
        assert_eq!(requests_to(&state, "/tasklist")[0].method, Method::POST);
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let (url, _state) = spawn_server(3).await;
        let client = client_for(url);

        let outcome = client
            .submit(&FormSubmission::new("/missing", HttpMethod::Post))
            .await
            .unwrap();

        assert_eq!(outcome.status, 404);
    }

    #[tokio::test]
    async fn test_login_redirect_is_reported() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url);

        let outcome = client
            .submit(&FormSubmission::new("/guarded", HttpMethod::Post))
            .await
            .unwrap();

        assert_eq!(outcome.status, 200);
        assert!(outcome.redirected);
        assert!(outcome.location.ends_with("/login"));
        assert_eq!(requests_to(&state, "/login").len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let client = client_for("http://127.0.0.1:9".to_string());
        let result = client
            .submit(&FormSubmission::new("/tasklist", HttpMethod::Post))
            .await;

        assert!(matches!(result, Err(ClientError::Http(_))));
    }

    #[tokio::test]
    async fn test_load_page_and_pagination() {
        let (url, _state) = spawn_server(3).await;
        let client = client_for(url);

        let first = client.load_page(1, 2, false).await.unwrap();
        assert_eq!(first.tasks.len(), 2);
        assert!(first.has_next());
        assert!(!first.has_prev());
        assert_eq!(first.total_pages(), 2);

        let second = client.load_page(2, 2, false).await.unwrap();
        assert_eq!(second.tasks.len(), 1);
        assert!(second.has_prev());
        assert_eq!(
            client.current_view(),
            CurrentView::Page(PageRequest { page: 2, length: 2 })
        );
    }

    #[tokio::test]
    async fn test_listed_rows_get_ids_from_search() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url);

        let page = client.load_page(1, 2, false).await.unwrap();

        assert_eq!(page.tasks[0].id, Some(100));
        assert_eq!(page.tasks[0].bid, Some(7));
        assert_eq!(page.tasks[1].id, Some(101));
        assert!(page.tasks.iter().all(|t| t.is_deletable()));

        let lookups = requests_to(&state, "/api/1.0/tasks");
        assert_eq!(lookups.len(), 2);
        assert_eq!(lookups[0].query.as_deref(), Some("url=uuid-0"));
    }

    #[tokio::test]
    async fn test_delete_of_listed_row_posts_its_ids() {
        let (url, state) = spawn_server(3).await;
        let config = config_for(url);
        let client = DashboardClient::new(config.clone()).unwrap();
        let page = client.load_page(1, 2, false).await.unwrap();

        let mut controller = ModalController::new();
        controller.show(&page.tasks[1].trigger(&config));
        let form = controller.confirm().unwrap();
        client.submit(&form).await.unwrap();

        let posts = requests_to(&state, "/tasklist");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].body, "id=101&bid=7&action=del");
    }

    #[tokio::test]
    async fn test_load_page_steps_back_when_out_of_range() {
        let (url, _state) = spawn_server(2).await;
        let client = client_for(url);

        let page = client.load_page(2, 2, false).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(
            client.current_view(),
            CurrentView::Page(PageRequest { page: 1, length: 2 })
        );
    }

    #[tokio::test]
    async fn test_no_records_is_empty_page() {
        let (url, _state) = spawn_server(0).await;
        let client = client_for(url);

        let page = client.load_page(1, 2, false).await.unwrap();

        assert!(page.tasks.is_empty());
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn test_search_by_task_name() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url);
        let search = TaskSearch::new(SearchField::TaskName, "task-2").unwrap();

        let page = client.search(&search).await.unwrap();

        assert_eq!(page.tasks.len(), 1);
        assert_eq!(page.tasks[0].id, Some(102));
        assert_eq!(page.count, 1);
        assert_eq!(
            requests_to(&state, "/api/1.0/tasks")[0].query.as_deref(),
            Some("taskname=task-2")
        );
    }

    #[tokio::test]
    async fn test_search_without_matches_is_empty() {
        let (url, _state) = spawn_server(3).await;
        let client = client_for(url);
        let search = TaskSearch::new(SearchField::BusinessName, "billing").unwrap();

        let page = client.search(&search).await.unwrap();

        assert!(page.tasks.is_empty());
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn test_search_error_envelope() {
        let (url, _state) = spawn_server(3).await;
        let client = client_for(url);
        let search = TaskSearch::new(SearchField::TaskName, "forbidden").unwrap();

        let result = client.search_tasks(&search).await;

        match result {
            Err(ClientError::Server {
                status,
                error,
                message,
            }) => {
                assert_eq!(status, 403);
                assert_eq!(error, "Forbidden");
                assert_eq!(message, "Active user only");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reload_repeats_active_search() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url);
        let search = TaskSearch::new(SearchField::BusinessName, "ops").unwrap();
        client.search(&search).await.unwrap();

        client.reload(false).await.unwrap();

        let lookups = requests_to(&state, "/api/1.0/tasks");
        assert_eq!(lookups.len(), 2);
        assert_eq!(lookups[1].query.as_deref(), Some("bizname=ops"));
        assert!(requests_to(&state, "/api/1.0/tasks/all").is_empty());
        assert_eq!(client.last_page().unwrap().count, 3);
    }

    #[tokio::test]
    async fn test_dialog_close_reloads_current_page_from_cache() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url.clone());
        client.load_page(2, 2, false).await.unwrap();

        let mut controller = ModalController::new();
        controller.show(
            &TriggerData::new()
                .with_href(format!("{}/tasklist", url))
                .with_id("1")
                .with_bid("1")
                .with_action("del"),
        );
        controller.cancel();
        let effect = controller.hidden().unwrap();
        apply_effect(&client, effect).await.unwrap();

        let listings = requests_to(&state, "/api/1.0/tasks/all");
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[1].query.as_deref(), Some("page=2&length=2"));
        assert_eq!(listings[1].cache_control, None);
        assert!(client.last_page().is_some());
    }

    #[tokio::test]
    async fn test_forced_reload_bypasses_cache() {
        let (url, state) = spawn_server(3).await;
        let client = client_for(url);

        client.reload(true).await.unwrap();

        assert_eq!(
            requests_to(&state, "/api/1.0/tasks/all")[0]
                .cache_control
                .as_deref(),
            Some("no-cache")
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let client = client_for("http://cronmon.local/".to_string());

        assert_eq!(
            client.resolve("").unwrap().as_str(),
            "http://cronmon.local/tasklist"
        );
        assert_eq!(
            client.resolve("/businesslist").unwrap().as_str(),
            "http://cronmon.local/businesslist"
        );
        assert_eq!(
            client.resolve("https://other.host/x").unwrap().as_str(),
            "https://other.host/x"
        );
    }
}
