//! The seam between the task list controller and the remote todo service.
//!
//! Two implementations exist: [`crate::http::HttpTodoApi`] on native
//! targets and a gloo-net client inside the browser build. Tests drive the
//! controller through in-memory fixtures.

use async_trait::async_trait;
use tasklist_shared::{TaskCreate, TaskDto, TaskId, TaskUpdate};

/// Development default; deployments point at their own service instead.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("{method} {url} could not be completed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("{method} {url} returned an unreadable body: {message}")]
    Decode {
        method: &'static str,
        url: String,
        message: String,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The four calls the task list needs from the todo service.
///
/// Futures are not required to be `Send`: the controller runs on a single
/// thread, and the browser implementation cannot be `Send` at all.
#[async_trait(?Send)]
pub trait TodoApi {
    /// `GET /todos/`
    async fn list_tasks(&self) -> ApiResult<Vec<TaskDto>>;

    /// `POST /todos/`. The created task in the response is not used by
    /// the controller, which refetches instead.
    async fn create_task(&self, task: &TaskCreate) -> ApiResult<()>;

    /// `PUT /todos/{id}`
    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> ApiResult<()>;

    /// `DELETE /todos/{id}`
    async fn delete_task(&self, id: &TaskId) -> ApiResult<()>;
}

/// Joins a base URL and a todo path, tolerating a trailing slash on the base.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

pub fn collection_path() -> &'static str {
    "/todos/"
}

pub fn task_path(id: &TaskId) -> String {
    format!("/todos/{id}")
}
