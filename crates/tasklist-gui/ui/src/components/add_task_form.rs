use yew::{
  Callback,
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
pub struct AddTaskFormProps {
  pub draft:     String,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>
}

#[function_component(AddTaskForm)]
pub fn add_task_form(
  props: &AddTaskFormProps
) -> Html {
  let oninput = {
    let on_input =
      props.on_input.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };
  let onkeydown = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() == "Enter" {
          e.prevent_default();
          on_submit.emit(());
        }
      }
    )
  };
  let onclick = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_submit.emit(())
      }
    )
  };

  html! {
      <div class="add-task">
          <input
              type="text"
              placeholder="Add a new task"
              value={props.draft.clone()}
              {oninput}
              {onkeydown}
          />
          <button type="button" {onclick}>{ "Add Task" }</button>
      </div>
  }
}

#[cfg(test)]
mod tests {
  use yew::ServerRenderer;

  use super::*;

  #[tokio::test]
  async fn renders_input_and_add_task_button()
  {
    let rendered =
      ServerRenderer::<AddTaskForm>::with_props(
        || AddTaskFormProps {
          draft:     "Buy milk".to_string(),
          on_input:  Callback::noop(),
          on_submit: Callback::noop()
        }
      )
      .hydratable(false)
      .render()
      .await;

    assert!(rendered.contains(">Add Task</button>"));
    assert!(rendered.contains("placeholder=\"Add a new task\""));
  }
}
