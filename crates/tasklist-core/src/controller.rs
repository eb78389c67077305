//! Client-side state of the task list and the handlers that drive it.
//!
//! Every mutation goes to the todo service first and is followed by a full
//! refetch; the local collection is never patched in place. Failures from
//! the service are logged and swallowed so the view stays interactive.

use std::cell::RefCell;

use tasklist_shared::{
  TaskCreate,
  TaskDto,
  TaskFilter,
  TaskId,
  TaskUpdate,
  Theme
};
use tracing::{
  debug,
  error,
  info,
  instrument
};

use crate::api::TodoApi;

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct EditDraft {
  pub id:    TaskId,
  pub title: String
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct TaskListState {
  /// Last snapshot of the server
  /// collection, in server order.
  pub tasks:       Vec<TaskDto>,
  pub draft_title: String,
  pub filter:      TaskFilter,
  pub editing:     Option<EditDraft>,
  pub dark_mode:   bool
}

impl TaskListState {
  /// Exact id match first, then a match
  /// on the written-out id.
  pub fn find(
    &self,
    id: &TaskId
  ) -> Option<&TaskDto> {
    self
      .tasks
      .iter()
      .find(|task| &task.id == id)
      .or_else(|| {
        self
          .tasks
          .iter()
          .find(|task| task.id.same_text(id))
      })
  }

  pub fn visible_tasks(
    &self
  ) -> Vec<TaskDto> {
    self
      .tasks
      .iter()
      .filter(|task| {
        self.filter.matches(task)
      })
      .cloned()
      .collect()
  }

  pub fn is_editing(
    &self,
    id: &TaskId
  ) -> bool {
    self
      .editing
      .as_ref()
      .is_some_and(|edit| {
        edit.id.same_text(id)
      })
  }

  pub fn theme(&self) -> Theme {
    Theme::from_dark_mode(
      self.dark_mode
    )
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  thiserror::Error,
)]
pub enum ControllerError {
  #[error("task {0} not found")]
  TaskNotFound(TaskId)
}

/// Owns the task list state and mediates
/// between user gestures and the todo
/// service.
///
/// Handlers take `&self` so several can
/// be in flight on one thread. Their
/// refetches are not ordered: whichever
/// response lands last wins.
pub struct TaskListController<A> {
  api:   A,
  state: RefCell<TaskListState>
}

impl<A: TodoApi> TaskListController<A> {
  pub fn new(api: A) -> Self {
    Self::with_state(
      api,
      TaskListState::default()
    )
  }

  pub fn with_state(
    api: A,
    state: TaskListState
  ) -> Self {
    Self {
      api,
      state: RefCell::new(state)
    }
  }

  pub fn api(&self) -> &A {
    &self.api
  }

  pub fn snapshot(
    &self
  ) -> TaskListState {
    self.state.borrow().clone()
  }

  pub fn visible_tasks(
    &self
  ) -> Vec<TaskDto> {
    self.state.borrow().visible_tasks()
  }

  /// Replaces the local collection with
  /// the server's. On failure the
  /// previous collection stays visible.
  #[instrument(skip(self))]
  pub async fn load_tasks(&self) {
    match self.api.list_tasks().await {
      | Ok(tasks) => {
        debug!(
          count = tasks.len(),
          "replacing task collection"
        );
        self.state.borrow_mut().tasks =
          tasks;
      }
      | Err(err) => {
        error!(error = %err, "fetching tasks failed");
      }
    }
  }

  pub fn set_draft(
    &self,
    text: impl Into<String>
  ) {
    self.state.borrow_mut().draft_title =
      text.into();
  }

  /// Creates a task titled `title`.
  ///
  /// Blank titles are ignored without a
  /// request. On success the draft is
  /// cleared and the list refetched; on
  /// failure the draft is kept so the
  /// user can retry.
  #[instrument(skip_all, fields(title_len = title.len()))]
  pub async fn add_task(
    &self,
    title: &str
  ) {
    if title.trim().is_empty() {
      debug!(
        "ignoring blank task title"
      );
      return;
    }

    let payload = TaskCreate::new(title);
    match self
      .api
      .create_task(&payload)
      .await
    {
      | Ok(()) => {
        info!("task created");
        self
          .state
          .borrow_mut()
          .draft_title
          .clear();
        self.load_tasks().await;
      }
      | Err(err) => {
        error!(error = %err, "creating task failed; keeping draft");
      }
    }
  }

  /// Submits whatever is currently in
  /// the draft.
  pub async fn submit_draft(&self) {
    let draft = self
      .state
      .borrow()
      .draft_title
      .clone();
    self.add_task(&draft).await;
  }

  /// Flips `completed` on the server and
  /// refetches, whether or not the update
  /// succeeded.
  #[instrument(skip_all, fields(id = %id))]
  pub async fn toggle_completed(
    &self,
    id: &TaskId
  ) -> Result<(), ControllerError> {
    let (task_id, update) = {
      let state = self.state.borrow();
      let task =
        state.find(id).ok_or_else(
          || {
            ControllerError::TaskNotFound(
              id.clone()
            )
          }
        )?;
      (
        task.id.clone(),
        TaskUpdate::toggled(task)
      )
    };

    if let Err(err) = self
      .api
      .update_task(&task_id, &update)
      .await
    {
      error!(error = %err, "toggling task failed");
    }

    self.load_tasks().await;
    Ok(())
  }

  #[instrument(skip_all, fields(id = %id))]
  pub async fn delete_task(
    &self,
    id: &TaskId
  ) {
    if let Err(err) =
      self.api.delete_task(id).await
    {
      error!(error = %err, "deleting task failed");
    }

    self.load_tasks().await;
  }

  /// Puts `id` into inline edit mode,
  /// silently abandoning any other edit.
  #[instrument(skip_all, fields(id = %id))]
  pub fn begin_edit(
    &self,
    id: &TaskId
  ) -> Result<(), ControllerError> {
    let mut state =
      self.state.borrow_mut();
    let (task_id, title) = state
      .find(id)
      .map(|task| {
        (
          task.id.clone(),
          task.title.clone()
        )
      })
      .ok_or_else(|| {
        ControllerError::TaskNotFound(
          id.clone()
        )
      })?;

    if let Some(previous) =
      state.editing.as_ref()
      && previous.id != task_id
    {
      debug!(abandoned = %previous.id, "abandoning unsaved edit");
    }

    state.editing = Some(EditDraft {
      id: task_id,
      title
    });
    Ok(())
  }

  pub fn set_edit_draft(
    &self,
    text: impl Into<String>
  ) {
    if let Some(edit) =
      self.state.borrow_mut().editing.as_mut()
    {
      edit.title = text.into();
    }
  }

  pub fn cancel_edit(&self) {
    self.state.borrow_mut().editing =
      None;
  }

  /// Sends the pending title for `id`
  /// and leaves edit mode regardless of
  /// the outcome.
  ///
  /// Does nothing when `id` is not the
  /// task being edited, so a blur that
  /// follows an Enter save is harmless.
  #[instrument(skip_all, fields(id = %id))]
  pub async fn save_edit(
    &self,
    id: &TaskId
  ) -> Result<(), ControllerError> {
    let (edit_id, update) = {
      let mut state =
        self.state.borrow_mut();
      if !state.is_editing(id) {
        debug!(
          "no active edit for task"
        );
        return Ok(());
      }
      let Some(edit) =
        state.editing.take()
      else {
        return Ok(());
      };
      let task = state
        .find(&edit.id)
        .ok_or_else(|| {
          ControllerError::TaskNotFound(
            edit.id.clone()
          )
        })?;
      (
        edit.id.clone(),
        TaskUpdate::renamed(
          task, edit.title
        )
      )
    };

    if let Err(err) = self
      .api
      .update_task(&edit_id, &update)
      .await
    {
      error!(error = %err, "saving task title failed");
    }

    self.load_tasks().await;
    Ok(())
  }

  pub fn set_filter(
    &self,
    filter: TaskFilter
  ) {
    debug!(filter = %filter, "filter changed");
    self.state.borrow_mut().filter =
      filter;
  }

  pub fn toggle_theme(&self) {
    let mut state =
      self.state.borrow_mut();
    state.dark_mode = !state.dark_mode;
    debug!(
      dark_mode = state.dark_mode,
      "theme toggled"
    );
  }
}
