use tasklist_shared::Theme;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
  pub theme:     Theme,
  pub on_toggle: Callback<()>
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(
  props: &ThemeToggleProps
) -> Html {
  let on_toggle =
    props.on_toggle.clone();

  html! {
      <button class="theme-toggle" type="button" onclick={move |_| on_toggle.emit(())}>
          { props.theme.toggle_label() }
      </button>
  }
}
