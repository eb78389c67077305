use std::future::Future;
use std::rc::Rc;

use gloo::console::log;
use tasklist_core::TaskListController;
use tasklist_shared::{
  TaskFilter,
  TaskId
};
use yew::{
  Callback,
  Html,
  UseForceUpdateHandle,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_memo
};

use crate::api::GlooTodoApi;
use crate::components::{
  AddTaskForm,
  FilterBar,
  TaskList,
  ThemeToggle
};

type Controller =
  TaskListController<GlooTodoApi>;

#[function_component(App)]
pub fn app() -> Html {
  let controller = use_memo((), |_| {
    TaskListController::new(
      GlooTodoApi::from_build_env()
    )
  });
  let redraw = use_force_update();

  {
    let controller = controller.clone();
    let redraw = redraw.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "loading initial task list"
      );
      spawn_then_redraw(
        controller,
        redraw,
        move |controller| async move {
          controller.load_tasks().await;
        }
      );
      || ()
    });
  }

  let state = controller.snapshot();
  let theme = state.theme();
  let palette = theme.palette();

  let on_draft_input = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |text: String| {
      controller.set_draft(text);
      redraw.force_update();
    })
  };
  let on_submit = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |()| {
      spawn_then_redraw(
        controller.clone(),
        redraw.clone(),
        move |controller| async move {
          controller.submit_draft().await;
        }
      );
    })
  };
  let on_filter = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(
      move |filter: TaskFilter| {
        ui_debug(
          "filter.changed",
          filter.as_key()
        );
        controller.set_filter(filter);
        redraw.force_update();
      }
    )
  };
  let on_toggle_theme = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |()| {
      controller.toggle_theme();
      redraw.force_update();
    })
  };
  let on_toggle = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      spawn_then_redraw(
        controller.clone(),
        redraw.clone(),
        move |controller| async move {
          if let Err(err) = controller
            .toggle_completed(&id)
            .await
          {
            tracing::error!(error = %err, "toggle ignored");
          }
        }
      );
    })
  };
  let on_delete = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      spawn_then_redraw(
        controller.clone(),
        redraw.clone(),
        move |controller| async move {
          controller.delete_task(&id).await;
        }
      );
    })
  };
  let on_begin_edit = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      if let Err(err) =
        controller.begin_edit(&id)
      {
        tracing::error!(error = %err, "edit not started");
      }
      redraw.force_update();
    })
  };
  let on_edit_input = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |text: String| {
      controller.set_edit_draft(text);
      redraw.force_update();
    })
  };
  let on_save_edit = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |id: TaskId| {
      // Enter saves and the blur that
      // follows finds no active edit.
      if !controller
        .snapshot()
        .is_editing(&id)
      {
        return;
      }
      spawn_then_redraw(
        controller.clone(),
        redraw.clone(),
        move |controller| async move {
          if let Err(err) =
            controller.save_edit(&id).await
          {
            tracing::error!(error = %err, "edit dropped");
          }
        }
      );
    })
  };
  let on_cancel_edit = {
    let controller = controller.clone();
    let redraw = redraw.clone();
    Callback::from(move |()| {
      controller.cancel_edit();
      redraw.force_update();
    })
  };

  let page_style = format!(
    "min-height:100vh;padding:16px;\
     background-color:{};color:{};",
    palette.background, palette.text
  );

  html! {
      <div class="app" style={page_style}>
          <h1>{ "List of Task" }</h1>
          <AddTaskForm
              draft={state.draft_title.clone()}
              on_input={on_draft_input}
              on_submit={on_submit}
          />
          <FilterBar active={state.filter} on_select={on_filter} />
          <ThemeToggle theme={theme} on_toggle={on_toggle_theme} />
          <TaskList
              tasks={state.visible_tasks()}
              editing={state.editing.clone()}
              on_toggle={on_toggle}
              on_delete={on_delete}
              on_begin_edit={on_begin_edit}
              on_edit_input={on_edit_input}
              on_save_edit={on_save_edit}
              on_cancel_edit={on_cancel_edit}
          />
      </div>
  }
}

/// Runs `action` off the event handler
/// and re-renders once it settles.
fn spawn_then_redraw<F, Fut>(
  controller: Rc<Controller>,
  redraw: UseForceUpdateHandle,
  action: F
) where
  F: FnOnce(Rc<Controller>) -> Fut
    + 'static,
  Fut: Future<Output = ()> + 'static
{
  wasm_bindgen_futures::spawn_local(
    async move {
      action(controller).await;
      redraw.force_update();
    }
  );
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
