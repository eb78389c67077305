use tasklist_shared::TaskFilter;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub active:    TaskFilter,
  pub on_select: Callback<TaskFilter>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  html! {
      <div class="filters">
          {
              for TaskFilter::ALL.into_iter().map(|filter| {
                  let on_select = props.on_select.clone();
                  let style = if filter == props.active {
                      "font-weight:bold;text-decoration:underline;"
                  } else {
                      ""
                  };
                  html! {
                      <button
                          type="button"
                          style={style}
                          aria-pressed={(filter == props.active).to_string()}
                          onclick={move |_| on_select.emit(filter)}
                      >
                          { filter.label() }
                      </button>
                  }
              })
          }
      </div>
  }
}
