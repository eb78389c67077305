use tasklist_core::EditDraft;
use tasklist_shared::{
  TaskDto,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:          Vec<TaskDto>,
  pub editing:        Option<EditDraft>,
  pub on_toggle:      Callback<TaskId>,
  pub on_delete:      Callback<TaskId>,
  pub on_begin_edit:  Callback<TaskId>,
  pub on_edit_input:  Callback<String>,
  pub on_save_edit:   Callback<TaskId>,
  pub on_cancel_edit: Callback<()>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <ul class="tasks" style="list-style:none;padding:0;">
          {
              for props.tasks.iter().cloned().map(|task| {
                  let edit_title = props
                      .editing
                      .as_ref()
                      .filter(|edit| edit.id == task.id)
                      .map(|edit| edit.title.clone());
                  let key = task.id.to_string();
                  html! {
                      <TaskRow
                          key={key}
                          task={task}
                          edit_title={edit_title}
                          on_toggle={props.on_toggle.clone()}
                          on_delete={props.on_delete.clone()}
                          on_begin_edit={props.on_begin_edit.clone()}
                          on_edit_input={props.on_edit_input.clone()}
                          on_save_edit={props.on_save_edit.clone()}
                          on_cancel_edit={props.on_cancel_edit.clone()}
                      />
                  }
              })
          }
      </ul>
  }
}
