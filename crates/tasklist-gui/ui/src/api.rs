use async_trait::async_trait;
use gloo::net::http::{
  Request,
  Response
};
use tasklist_core::api::{
  self as todo,
  DEFAULT_API_URL
};
use tasklist_core::{
  ApiError,
  ApiResult,
  TodoApi
};
use tasklist_shared::{
  TaskCreate,
  TaskDto,
  TaskId,
  TaskUpdate
};

/// Base URL baked in at build time
/// through `TASKLIST_API_URL`.
pub fn configured_base_url()
-> &'static str {
  option_env!("TASKLIST_API_URL")
    .filter(|url| !url.trim().is_empty())
    .unwrap_or(DEFAULT_API_URL)
}

/// Browser client for the todo service,
/// backed by `fetch`.
#[derive(Debug, Clone)]
pub struct GlooTodoApi {
  base_url: String
}

impl GlooTodoApi {
  pub fn new(
    base_url: impl Into<String>
  ) -> Self {
    let base_url: String =
      base_url.into();
    Self {
      base_url: base_url
        .trim_end_matches('/')
        .to_string()
    }
  }

  pub fn from_build_env() -> Self {
    Self::new(configured_base_url())
  }

  fn url(&self, path: &str) -> String {
    todo::endpoint(&self.base_url, path)
  }
}

#[async_trait(?Send)]
impl TodoApi for GlooTodoApi {
  async fn list_tasks(
    &self
  ) -> ApiResult<Vec<TaskDto>> {
    let url =
      self.url(todo::collection_path());
    let response = send(
      "GET",
      &url,
      Request::get(&url).send().await
    )?;

    response.json::<Vec<TaskDto>>().await.map_err(
      |err| ApiError::Decode {
        method: "GET",
        url,
        message: err.to_string()
      }
    )
  }

  async fn create_task(
    &self,
    task: &TaskCreate
  ) -> ApiResult<()> {
    let url =
      self.url(todo::collection_path());
    let request = Request::post(&url)
      .json(task)
      .map_err(|err| {
        ApiError::Client(err.to_string())
      })?;
    send("POST", &url, request.send().await)?;
    Ok(())
  }

  async fn update_task(
    &self,
    id: &TaskId,
    update: &TaskUpdate
  ) -> ApiResult<()> {
    let url = self.url(&todo::task_path(id));
    let request = Request::put(&url)
      .json(update)
      .map_err(|err| {
        ApiError::Client(err.to_string())
      })?;
    send("PUT", &url, request.send().await)?;
    Ok(())
  }

  async fn delete_task(
    &self,
    id: &TaskId
  ) -> ApiResult<()> {
    let url = self.url(&todo::task_path(id));
    send(
      "DELETE",
      &url,
      Request::delete(&url).send().await
    )?;
    Ok(())
  }
}

fn send(
  method: &'static str,
  url: &str,
  result: Result<
    Response,
    gloo::net::Error
  >
) -> ApiResult<Response> {
  let response =
    result.map_err(|err| {
      ApiError::Transport {
        method,
        url: url.to_string(),
        message: err.to_string()
      }
    })?;

  if !response.ok() {
    return Err(ApiError::Status {
      method,
      url: url.to_string(),
      status: response.status()
    });
  }

  Ok(response)
}
