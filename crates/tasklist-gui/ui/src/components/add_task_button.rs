use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct AddTaskButtonProps {
  pub on_add: Callback<()>
}

#[function_component(AddTaskButton)]
pub fn add_task_button(
  props: &AddTaskButtonProps
) -> Html {
  let on_add = props.on_add.clone();

  html! {
      <button
          id="fab-add-task"
          title="Add Task"
          onclick={move |_| on_add.emit(())}
      >
          { "+" }
      </button>
  }
}
