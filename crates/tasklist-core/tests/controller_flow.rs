use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use tasklist_core::{
    ApiError, ApiResult, ControllerError, TaskListController, TaskListState, TodoApi,
};
use tasklist_shared::{TaskCreate, TaskDto, TaskFilter, TaskId, TaskUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    List,
    Create(TaskCreate),
    Update(TaskId, TaskUpdate),
    Delete(TaskId),
}

/// In-memory todo service that records every call.
#[derive(Default)]
struct FixtureApi {
    tasks: RefCell<Vec<TaskDto>>,
    next_id: Cell<i64>,
    calls: RefCell<Vec<Call>>,
    fail_list: Cell<bool>,
    fail_mutations: Cell<bool>,
}

impl FixtureApi {
    fn with_tasks(tasks: Vec<TaskDto>) -> Self {
        let next_id = tasks.len() as i64 + 1;
        Self {
            tasks: RefCell::new(tasks),
            next_id: Cell::new(next_id),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| *call != Call::List)
            .collect()
    }

    fn server_tasks(&self) -> Vec<TaskDto> {
        self.tasks.borrow().clone()
    }

    fn failure(&self, method: &'static str, status: u16) -> ApiError {
        ApiError::Status {
            method,
            url: "http://fixture/todos/".to_string(),
            status,
        }
    }
}

#[async_trait(?Send)]
impl TodoApi for FixtureApi {
    async fn list_tasks(&self) -> ApiResult<Vec<TaskDto>> {
        self.calls.borrow_mut().push(Call::List);
        if self.fail_list.get() {
            return Err(self.failure("GET", 500));
        }
        Ok(self.server_tasks())
    }

    async fn create_task(&self, task: &TaskCreate) -> ApiResult<()> {
        self.calls.borrow_mut().push(Call::Create(task.clone()));
        if self.fail_mutations.get() {
            return Err(self.failure("POST", 500));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.tasks.borrow_mut().push(TaskDto {
            id: TaskId::from(id),
            title: task.title.clone(),
            completed: task.completed,
        });
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> ApiResult<()> {
        self.calls
            .borrow_mut()
            .push(Call::Update(id.clone(), update.clone()));
        if self.fail_mutations.get() {
            return Err(self.failure("PUT", 500));
        }
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| self.failure("PUT", 404))?;
        task.title = update.title.clone();
        task.completed = update.completed;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> ApiResult<()> {
        self.calls.borrow_mut().push(Call::Delete(id.clone()));
        if self.fail_mutations.get() {
            return Err(self.failure("DELETE", 500));
        }
        self.tasks.borrow_mut().retain(|task| &task.id != id);
        Ok(())
    }
}

fn task(id: i64, title: &str, completed: bool) -> TaskDto {
    TaskDto {
        id: TaskId::from(id),
        title: title.to_string(),
        completed,
    }
}

async fn loaded(tasks: Vec<TaskDto>) -> TaskListController<FixtureApi> {
    let controller = TaskListController::new(FixtureApi::with_tasks(tasks));
    controller.load_tasks().await;
    controller
}

#[tokio::test]
async fn initial_load_replaces_empty_collection_in_server_order() {
    let controller = TaskListController::new(FixtureApi::with_tasks(vec![
        task(2, "second", false),
        task(1, "first", true),
    ]));
    assert!(controller.snapshot().tasks.is_empty());

    controller.load_tasks().await;

    let titles: Vec<_> = controller
        .snapshot()
        .tasks
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, ["second", "first"]);
}

#[tokio::test]
async fn every_filter_shows_the_matching_subset_in_order() {
    let controller = loaded(vec![
        task(1, "a", true),
        task(2, "b", false),
        task(3, "c", true),
        task(4, "d", false),
    ])
    .await;
    let calls_before = controller.api().calls().len();

    for filter in TaskFilter::ALL {
        controller.set_filter(filter);
        let expected: Vec<TaskDto> = controller
            .snapshot()
            .tasks
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();
        assert_eq!(controller.visible_tasks(), expected, "filter {filter}");
    }

    assert_eq!(controller.snapshot().tasks.len(), 4);
    assert_eq!(controller.api().calls().len(), calls_before);
}

#[tokio::test]
async fn blank_titles_do_not_reach_the_server() {
    let controller = loaded(vec![task(1, "A", false)]).await;
    controller.set_draft("   ");
    let before = controller.snapshot();

    controller.add_task("").await;
    controller.add_task("   ").await;
    controller.submit_draft().await;

    assert_eq!(controller.api().calls(), [Call::List]);
    assert_eq!(controller.snapshot(), before);
}

#[tokio::test]
async fn successful_add_clears_draft_and_shows_server_collection() {
    let controller = loaded(vec![task(1, "A", false)]).await;
    controller.set_draft("Buy milk");

    controller.submit_draft().await;

    let state = controller.snapshot();
    assert_eq!(state.draft_title, "");
    assert_eq!(state.tasks, controller.api().server_tasks());
    assert_eq!(
        state.tasks.last(),
        Some(&task(2, "Buy milk", false))
    );
    assert_eq!(
        controller.api().mutations(),
        [Call::Create(TaskCreate::new("Buy milk"))]
    );
}

#[tokio::test]
async fn failed_add_keeps_the_draft_for_retry() {
    let controller = loaded(vec![task(1, "A", false)]).await;
    controller.api().fail_mutations.set(true);
    controller.set_draft("Buy milk");

    controller.submit_draft().await;

    let state = controller.snapshot();
    assert_eq!(state.draft_title, "Buy milk");
    assert_eq!(state.tasks, vec![task(1, "A", false)]);
    assert_eq!(controller.api().calls().last(), Some(&Call::Create(TaskCreate::new("Buy milk"))));
}

#[tokio::test]
async fn toggle_sends_same_title_with_inverted_flag() {
    let controller = loaded(vec![task(1, "open", false), task(2, "done", true)]).await;

    controller
        .toggle_completed(&TaskId::from(1))
        .await
        .expect("task 1 is loaded");
    controller
        .toggle_completed(&TaskId::from(2))
        .await
        .expect("task 2 is loaded");

    assert_eq!(
        controller.api().mutations(),
        [
            Call::Update(
                TaskId::from(1),
                TaskUpdate {
                    title: "open".to_string(),
                    completed: true
                }
            ),
            Call::Update(
                TaskId::from(2),
                TaskUpdate {
                    title: "done".to_string(),
                    completed: false
                }
            ),
        ]
    );
}

#[tokio::test]
async fn toggle_of_unknown_task_sends_nothing() {
    let controller = loaded(vec![task(1, "A", false)]).await;

    let err = controller
        .toggle_completed(&TaskId::from(9))
        .await
        .expect_err("task 9 is not loaded");

    assert_eq!(err, ControllerError::TaskNotFound(TaskId::from(9)));
    assert_eq!(controller.api().calls(), [Call::List]);
}

#[tokio::test]
async fn toggle_scenario_moves_task_between_filters() {
    let controller = loaded(vec![task(1, "A", false)]).await;

    controller
        .toggle_completed(&TaskId::from(1))
        .await
        .expect("task 1 is loaded");

    assert_eq!(
        controller.api().calls(),
        [
            Call::List,
            Call::Update(
                TaskId::from(1),
                TaskUpdate {
                    title: "A".to_string(),
                    completed: true
                }
            ),
            Call::List,
        ]
    );
    assert_eq!(controller.snapshot().tasks, vec![task(1, "A", true)]);

    controller.set_filter(TaskFilter::Pending);
    assert!(controller.visible_tasks().is_empty());

    controller.set_filter(TaskFilter::Completed);
    assert_eq!(controller.visible_tasks(), vec![task(1, "A", true)]);
}

#[tokio::test]
async fn delete_removes_task_from_server_and_refetch() {
    let controller = loaded(vec![task(1, "A", false), task(2, "B", false)]).await;

    controller.delete_task(&TaskId::from(1)).await;

    assert_eq!(controller.api().server_tasks(), vec![task(2, "B", false)]);
    assert_eq!(controller.snapshot().tasks, vec![task(2, "B", false)]);
    assert_eq!(controller.api().calls().last(), Some(&Call::List));
}

#[tokio::test]
async fn failed_mutations_still_refetch() {
    let controller = loaded(vec![task(1, "A", false)]).await;
    controller.api().fail_mutations.set(true);

    controller
        .toggle_completed(&TaskId::from(1))
        .await
        .expect("task 1 is loaded");
    controller.delete_task(&TaskId::from(1)).await;
    controller.begin_edit(&TaskId::from(1)).expect("task 1 is loaded");
    controller.set_edit_draft("B");
    controller
        .save_edit(&TaskId::from(1))
        .await
        .expect("task 1 is loaded");

    let calls = controller.api().calls();
    assert_eq!(calls.len(), 7);
    assert!(matches!(calls[2], Call::List));
    assert!(matches!(calls[4], Call::List));
    assert!(matches!(calls[6], Call::List));
    assert_eq!(controller.snapshot().tasks, vec![task(1, "A", false)]);
    assert!(controller.snapshot().editing.is_none());
}

#[tokio::test]
async fn edit_renames_only_the_edited_task() {
    let controller = loaded(vec![task(1, "A", true), task(2, "B", false)]).await;

    controller.begin_edit(&TaskId::from(1)).expect("task 1 is loaded");
    assert_eq!(
        controller.snapshot().editing.map(|edit| edit.title),
        Some("A".to_string())
    );
    controller.set_edit_draft("A, renamed");
    controller
        .save_edit(&TaskId::from(1))
        .await
        .expect("task 1 is loaded");

    let state = controller.snapshot();
    assert!(state.editing.is_none());
    assert_eq!(
        state.tasks,
        vec![task(1, "A, renamed", true), task(2, "B", false)]
    );
    assert_eq!(
        controller.api().mutations(),
        [Call::Update(
            TaskId::from(1),
            TaskUpdate {
                title: "A, renamed".to_string(),
                completed: true
            }
        )]
    );
}

#[tokio::test]
async fn starting_another_edit_abandons_the_first_without_a_request() {
    let controller = loaded(vec![task(1, "A", false), task(2, "B", false)]).await;

    controller.begin_edit(&TaskId::from(1)).expect("task 1 is loaded");
    controller.set_edit_draft("never sent");
    controller.begin_edit(&TaskId::from(2)).expect("task 2 is loaded");

    assert!(controller.api().mutations().is_empty());
    assert_eq!(
        controller.snapshot().editing.map(|edit| (edit.id, edit.title)),
        Some((TaskId::from(2), "B".to_string()))
    );

    // A stale save for the abandoned task is ignored.
    controller
        .save_edit(&TaskId::from(1))
        .await
        .expect("no active edit is not an error");
    assert!(controller.api().mutations().is_empty());

    controller.set_edit_draft("B2");
    controller
        .save_edit(&TaskId::from(2))
        .await
        .expect("task 2 is loaded");
    assert_eq!(
        controller.api().mutations(),
        [Call::Update(
            TaskId::from(2),
            TaskUpdate {
                title: "B2".to_string(),
                completed: false
            }
        )]
    );
    assert_eq!(controller.api().server_tasks()[0], task(1, "A", false));
}

#[tokio::test]
async fn blank_edit_title_is_sent_as_typed_and_refetched() {
    let controller = loaded(vec![task(1, "A", false)]).await;

    controller.begin_edit(&TaskId::from(1)).expect("task 1 is loaded");
    controller.set_edit_draft("   ");
    controller
        .save_edit(&TaskId::from(1))
        .await
        .expect("edit is active");

    assert!(controller.snapshot().editing.is_none());
    assert_eq!(
        controller.api().calls(),
        [
            Call::List,
            Call::Update(
                TaskId::from(1),
                TaskUpdate {
                    title: "   ".to_string(),
                    completed: false
                }
            ),
            Call::List,
        ]
    );
}

#[tokio::test]
async fn cancelled_edit_sends_nothing() {
    let controller = loaded(vec![task(1, "A", false)]).await;

    controller.begin_edit(&TaskId::from(1)).expect("task 1 is loaded");
    controller.set_edit_draft("A2");
    controller.cancel_edit();
    controller
        .save_edit(&TaskId::from(1))
        .await
        .expect("no active edit is fine");

    assert!(controller.snapshot().editing.is_none());
    assert!(controller.api().mutations().is_empty());
}

#[tokio::test]
async fn typed_numeric_id_finds_string_id_from_server() {
    let served = TaskId::Text("42".to_string());
    let controller = loaded(vec![TaskDto {
        id: served.clone(),
        title: "A".to_string(),
        completed: false,
    }])
    .await;
    let typed: TaskId = "42".parse().expect("valid id");

    controller.toggle_completed(&typed).await.expect("task 42 is loaded");
    controller.begin_edit(&typed).expect("task 42 is loaded");
    controller.set_edit_draft("B");
    controller.save_edit(&typed).await.expect("edit is active");

    assert_eq!(
        controller.api().mutations(),
        [
            Call::Update(
                served.clone(),
                TaskUpdate {
                    title: "A".to_string(),
                    completed: true
                }
            ),
            Call::Update(
                served.clone(),
                TaskUpdate {
                    title: "B".to_string(),
                    completed: true
                }
            ),
        ]
    );
    assert_eq!(controller.snapshot().tasks[0].title, "B");
}

#[tokio::test]
async fn failed_load_keeps_previous_collection() {
    let controller = loaded(vec![task(1, "A", false)]).await;
    controller.api().fail_list.set(true);
    controller.api().tasks.borrow_mut().push(task(2, "B", false));

    controller.load_tasks().await;

    assert_eq!(controller.snapshot().tasks, vec![task(1, "A", false)]);
}

#[tokio::test]
async fn theme_and_filter_are_local_only() {
    let controller = loaded(vec![task(1, "A", false)]).await;

    controller.toggle_theme();
    assert!(controller.snapshot().dark_mode);
    controller.toggle_theme();
    assert!(!controller.snapshot().dark_mode);
    controller.set_filter(TaskFilter::Completed);

    assert_eq!(controller.api().calls(), [Call::List]);
}

#[tokio::test]
async fn overlapping_mutations_settle_on_server_state() {
    let controller = TaskListController::with_state(
        FixtureApi::with_tasks(vec![task(1, "A", false), task(2, "B", false)]),
        TaskListState::default(),
    );
    controller.load_tasks().await;

    let first = TaskId::from(1);
    let second = TaskId::from(2);
    let (toggled, ()) = tokio::join!(
        controller.toggle_completed(&first),
        controller.delete_task(&second),
    );
    toggled.expect("task 1 is loaded");

    assert_eq!(controller.snapshot().tasks, controller.api().server_tasks());
    assert_eq!(controller.snapshot().tasks, vec![task(1, "A", true)]);
}
