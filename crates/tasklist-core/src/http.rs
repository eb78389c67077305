//! Native todo service client built on reqwest.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tasklist_shared::{TaskCreate, TaskDto, TaskId, TaskUpdate};
use tracing::{debug, instrument};

use crate::api::{ApiError, ApiResult, TodoApi, collection_path, endpoint, task_path};

/// Greeting served at the service root; used as a reachability probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceGreeting {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = validate_base_url(base_url)?;
        let client = Client::builder()
            .user_agent(concat!("tasklist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ApiError::Client(err.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /todos/{id}`
    #[instrument(skip_all, fields(id = %id))]
    pub async fn get_task(&self, id: &TaskId) -> ApiResult<TaskDto> {
        let url = endpoint(&self.base_url, &task_path(id));
        let response = execute("GET", &url, self.client.get(&url)).await?;
        decode("GET", &url, response).await
    }

    /// `GET /`
    #[instrument(skip(self))]
    pub async fn ping(&self) -> ApiResult<ServiceGreeting> {
        let url = endpoint(&self.base_url, "/");
        let response = execute("GET", &url, self.client.get(&url)).await?;
        decode("GET", &url, response).await
    }
}

#[async_trait(?Send)]
impl TodoApi for HttpTodoApi {
    #[instrument(skip(self))]
    async fn list_tasks(&self) -> ApiResult<Vec<TaskDto>> {
        let url = endpoint(&self.base_url, collection_path());
        let response = execute("GET", &url, self.client.get(&url)).await?;
        let tasks: Vec<TaskDto> = decode("GET", &url, response).await?;
        debug!(count = tasks.len(), "fetched todo collection");
        Ok(tasks)
    }

    #[instrument(skip_all, fields(title_len = task.title.len()))]
    async fn create_task(&self, task: &TaskCreate) -> ApiResult<()> {
        let url = endpoint(&self.base_url, collection_path());
        execute("POST", &url, self.client.post(&url).json(task)).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(id = %id, completed = update.completed))]
    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> ApiResult<()> {
        let url = endpoint(&self.base_url, &task_path(id));
        execute("PUT", &url, self.client.put(&url).json(update)).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn delete_task(&self, id: &TaskId) -> ApiResult<()> {
        let url = endpoint(&self.base_url, &task_path(id));
        execute("DELETE", &url, self.client.delete(&url)).await?;
        Ok(())
    }
}

fn validate_base_url(raw: &str) -> ApiResult<String> {
    let trimmed = raw.trim();
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason,
    };

    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

async fn execute(method: &'static str, url: &str, request: RequestBuilder) -> ApiResult<Response> {
    let response = request.send().await.map_err(|err| ApiError::Transport {
        method,
        url: url.to_string(),
        message: err.to_string(),
    })?;

    let status = response.status();
    debug!(method, url, status = status.as_u16(), "todo service responded");
    if !status.is_success() {
        return Err(ApiError::Status {
            method,
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(
    method: &'static str,
    url: &str,
    response: Response,
) -> ApiResult<T> {
    let bytes = response.bytes().await.map_err(|err| ApiError::Transport {
        method,
        url: url.to_string(),
        message: err.to_string(),
    })?;

    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode {
        method,
        url: url.to_string(),
        message: err.to_string(),
    })
}
