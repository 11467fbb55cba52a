use tasklist_core::TaskRow;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:       TaskRow,
  pub on_toggle: Callback<u64>,
  pub on_edit:   Callback<u64>,
  pub on_delete: Callback<u64>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.row.id;
  let on_toggle =
    props.on_toggle.clone();
  let on_edit = props.on_edit.clone();
  let on_delete =
    props.on_delete.clone();

  html! {
      <li class={props.row.row_class()} data-id={id.to_string()}>
          <span class="task-text" onclick={move |_| on_toggle.emit(id)}>
              { &props.row.text }
          </span>
          <div class="task-actions">
              <button title="Edit Task" onclick={move |_| on_edit.emit(id)}>
                  { "✏️" }
              </button>
              <button
                  title="Delete Task"
                  onclick={move |e: MouseEvent| {
                      e.stop_propagation();
                      on_delete.emit(id);
                  }}
              >
                  { "🗑️" }
              </button>
          </div>
      </li>
  }
}
