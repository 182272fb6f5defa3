//! Blocking HTTP client for the Todoist REST API

use std::time::Duration;

use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::request::{CompletedQuery, NewTask, TaskMove, TaskUpdate};
use super::TaskSource;
use crate::domain::{self, Comment, CompletedTask, Label, Project, Section, Task};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.todoist.com/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One page of a cursor-paginated list
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(alias = "items")]
    results: Vec<T>,

    #[serde(default)]
    next_cursor: Option<String>,
}

/// Authenticated API client
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl Client {
    /// Creates a client for the given base URL
    pub fn new(token: impl Into<String>, base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("todoist-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Returns the base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body: body.trim().to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let resp = self.authed(self.http.get(self.url(path))).query(query).send()?;
        Self::decode(Self::check(resp)?)
    }

    fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let resp = self.authed(self.http.post(self.url(path))).json(body).send()?;
        Self::decode(Self::check(resp)?)
    }

    fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.authed(self.http.post(self.url(path))).send()?;
        Self::check(resp)?;
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.authed(self.http.delete(self.url(path))).send()?;
        Self::check(resp)?;
        Ok(())
    }

    /// Fetches every page of a list endpoint, stopping early once `limit` items are collected
    fn paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        limit: Option<usize>,
    ) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut params = query.to_vec();
            if let Some(c) = &cursor {
                params.push(("cursor", c.clone()));
            }

            let page: Page<T> = self.get(path, &params)?;
            items.extend(page.results);

            if limit.is_some_and(|l| items.len() >= l) {
                break;
            }

            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
        }

        if let Some(l) = limit {
            items.truncate(l);
        }
        Ok(items)
    }

    // -------------------------------------------------------------------------
    // Projects, sections, labels
    // -------------------------------------------------------------------------

    pub fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.paginate("projects", &[], None)
    }

    pub fn add_project(&self, name: &str) -> Result<Project, ApiError> {
        self.post("projects", &serde_json::json!({ "name": name }))
    }

    pub fn get_sections(&self, project_id: Option<&str>) -> Result<Vec<Section>, ApiError> {
        let query: Vec<(&str, String)> = project_id
            .map(|id| vec![("project_id", id.to_string())])
            .unwrap_or_default();
        self.paginate("sections", &query, None)
    }

    pub fn get_labels(&self) -> Result<Vec<Label>, ApiError> {
        self.paginate("labels", &[], None)
    }

    // -------------------------------------------------------------------------
    // Tasks
    // -------------------------------------------------------------------------

    pub fn get_task(&self, id: &str) -> Result<Task, ApiError> {
        self.get(&format!("tasks/{id}"), &[]).map_err(|e| e.for_task(id))
    }

    pub fn add_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        self.post("tasks", task)
    }

    pub fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
        self.post(&format!("tasks/{id}"), update).map_err(|e| e.for_task(id))
    }

    pub fn close_task(&self, id: &str) -> Result<(), ApiError> {
        self.post_empty(&format!("tasks/{id}/close")).map_err(|e| e.for_task(id))
    }

    pub fn reopen_task(&self, id: &str) -> Result<(), ApiError> {
        self.post_empty(&format!("tasks/{id}/reopen")).map_err(|e| e.for_task(id))
    }

    pub fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("tasks/{id}")).map_err(|e| e.for_task(id))
    }

    pub fn move_task(&self, id: &str, destination: &TaskMove) -> Result<Task, ApiError> {
        self.post(&format!("tasks/{id}/move"), destination)
            .map_err(|e| e.for_task(id))
    }

    pub fn get_completed(&self, query: &CompletedQuery) -> Result<Vec<CompletedTask>, ApiError> {
        let mut params = vec![("since", query.since.clone()), ("until", query.until.clone())];
        if let Some(project_id) = &query.project_id {
            params.push(("project_id", project_id.clone()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.min(200).to_string()));
        }
        self.paginate("tasks/completed/by_completion_date", &params, query.limit)
    }

    // -------------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------------

    /// Fetches one page of comments starting at `cursor`
    pub fn comments_page(
        &self,
        task_id: &str,
        cursor: Option<&str>,
    ) -> Result<(Vec<Comment>, Option<String>), ApiError> {
        let mut params = vec![("task_id", task_id.to_string())];
        if let Some(c) = cursor {
            params.push(("cursor", c.to_string()));
        }

        let page: Page<Comment> = self.get("comments", &params).map_err(|e| e.for_task(task_id))?;
        Ok((page.results, page.next_cursor.filter(|c| !c.is_empty())))
    }

    pub fn add_comment(&self, task_id: &str, content: &str) -> Result<Comment, ApiError> {
        self.post(
            "comments",
            &serde_json::json!({ "task_id": task_id, "content": content }),
        )
        .map_err(|e| e.for_task(task_id))
    }
}

impl TaskSource for Client {
    fn find_project(&self, name: &str) -> Result<Project, ApiError> {
        let projects = self.get_projects()?;
        let project = domain::find_project(&projects, name)?;
        Ok(project.clone())
    }

    fn get_tasks(
        &self,
        project_id: Option<&str>,
        filter: Option<&str>,
    ) -> Result<Vec<Task>, ApiError> {
        match filter.filter(|f| !f.is_empty()) {
            Some(query) => {
                let tasks: Vec<Task> =
                    self.paginate("tasks/filter", &[("query", query.to_string())], None)?;
                Ok(match project_id {
                    Some(pid) => tasks.into_iter().filter(|t| t.project_id == pid).collect(),
                    None => tasks,
                })
            }
            None => {
                let query: Vec<(&str, String)> = project_id
                    .map(|id| vec![("project_id", id.to_string())])
                    .unwrap_or_default();
                self.paginate("tasks", &query, None)
            }
        }
    }

    fn get_comments(&self, task_id: &str) -> Result<Vec<Comment>, ApiError> {
        let mut comments = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let (page, next) = self.comments_page(task_id, cursor.as_deref())?;
            comments.extend(page);
            match next {
                Some(n) => cursor = Some(n),
                None => return Ok(comments),
            }
        }
    }
}
