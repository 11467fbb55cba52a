use tasklist_core::Filter;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub active:             Filter,
  pub items_left:         String,
  pub on_select:          Callback<Filter>,
  pub on_clear_completed: Callback<()>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let make_button = |filter: Filter| {
    let on_select =
      props.on_select.clone();
    let active = props.active == filter;
    html! {
        <button
            class={classes!("filter-btn", active.then_some("active"))}
            data-filter={filter.as_key()}
            onclick={move |_| on_select.emit(filter)}
        >
            { filter.label() }
        </button>
    }
  };
  let on_clear =
    props.on_clear_completed.clone();

  html! {
      <div class="filters">
          { for Filter::ALL.into_iter().map(make_button) }
          <button id="clearCompletedBtn" onclick={move |_| on_clear.emit(())}>
              { "Clear completed" }
          </button>
          <span class="items-left">{ &props.items_left }</span>
      </div>
  }
}
