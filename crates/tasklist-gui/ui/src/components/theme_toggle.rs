use web_sys::{
  Event,
  HtmlInputElement
};
use yew::{
  Callback,
  Html,
  NodeRef,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
  /// Checked means light.
  pub checked:   bool,
  /// Lets the owner put the box back when a change is refused.
  pub input_ref: NodeRef,
  pub on_change: Callback<bool>
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(
  props: &ThemeToggleProps
) -> Html {
  let on_change =
    props.on_change.clone();

  html! {
      <label class="theme-switch">
          <span>{ "Light mode" }</span>
          <input
              id="theme-toggle"
              ref={props.input_ref.clone()}
              type="checkbox"
              checked={props.checked}
              onchange={move |e: Event| {
                  let input: HtmlInputElement = e.target_unchecked_into();
                  on_change.emit(input.checked());
              }}
          />
      </label>
  }
}
