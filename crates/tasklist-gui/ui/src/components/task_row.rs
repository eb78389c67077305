use tasklist_shared::{
  TaskDto,
  TaskId
};
use yew::{
  Callback,
  Event,
  FocusEvent,
  Html,
  InputEvent,
  KeyboardEvent,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task:           TaskDto,
  /// Pending title while this row is
  /// being edited.
  pub edit_title:     Option<String>,
  pub on_toggle:      Callback<TaskId>,
  pub on_delete:      Callback<TaskId>,
  pub on_begin_edit:  Callback<TaskId>,
  pub on_edit_input:  Callback<String>,
  pub on_save_edit:   Callback<TaskId>,
  pub on_cancel_edit: Callback<()>
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let id = props.task.id.clone();

  let on_toggle = {
    let on_toggle =
      props.on_toggle.clone();
    let id = id.clone();
    Callback::from(move |_: Event| {
      on_toggle.emit(id.clone())
    })
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    let id = id.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_delete.emit(id.clone())
      }
    )
  };

  let title = match props.edit_title.as_ref() {
    | Some(edit_title) => {
      let oninput = {
        let on_edit_input =
          props.on_edit_input.clone();
        Callback::from(
          move |e: InputEvent| {
            let input: web_sys::HtmlInputElement =
              e.target_unchecked_into();
            on_edit_input
              .emit(input.value());
          }
        )
      };
      let onblur = {
        let on_save_edit =
          props.on_save_edit.clone();
        let id = id.clone();
        Callback::from(
          move |_: FocusEvent| {
            on_save_edit.emit(id.clone())
          }
        )
      };
      let onkeydown = {
        let on_save_edit =
          props.on_save_edit.clone();
        let on_cancel_edit =
          props.on_cancel_edit.clone();
        let id = id.clone();
        Callback::from(
          move |e: KeyboardEvent| {
            match e.key().as_str() {
              | "Enter" => {
                e.prevent_default();
                on_save_edit
                  .emit(id.clone());
              }
              | "Escape" => {
                on_cancel_edit.emit(())
              }
              | _ => {}
            }
          }
        )
      };

      html! {
          <input
              type="text"
              class="edit"
              autofocus={true}
              value={edit_title.clone()}
              {oninput}
              {onblur}
              {onkeydown}
          />
      }
    }
    | None => {
      let on_begin_edit = {
        let on_begin_edit =
          props.on_begin_edit.clone();
        let id = id.clone();
        Callback::from(
          move |_: MouseEvent| {
            on_begin_edit.emit(id.clone())
          }
        )
      };
      let style = if props.task.completed {
        "cursor:pointer;text-decoration:line-through;"
      } else {
        "cursor:pointer;"
      };

      html! {
          <span class="title" style={style} onclick={on_begin_edit}>
              { &props.task.title }
          </span>
      }
    }
  };

  html! {
      <li class="task" style="display:flex;gap:8px;align-items:center;">
          <input
              type="checkbox"
              checked={props.task.completed}
              onchange={on_toggle}
          />
          { title }
          <button type="button" onclick={on_delete}>{ "Delete" }</button>
      </li>
  }
}
