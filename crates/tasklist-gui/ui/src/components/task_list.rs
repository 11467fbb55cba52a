use tasklist_core::{
  ListBody,
  TaskListView
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub view:      TaskListView,
  pub on_toggle: Callback<u64>,
  pub on_edit:   Callback<u64>,
  pub on_delete: Callback<u64>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  match &props.view.body {
    | ListBody::Placeholder(text) => {
      html! {
          <ul id="task-list">
              <li class="no-tasks">{ text }</li>
          </ul>
      }
    }
    | ListBody::Rows(rows) => {
      html! {
          <ul id="task-list">
              {
                  for rows.iter().cloned().map(|row| {
                      let key = row.id.to_string();
                      html! {
                          <TaskListRow
                              key={key}
                              row={row}
                              on_toggle={props.on_toggle.clone()}
                              on_edit={props.on_edit.clone()}
                              on_delete={props.on_delete.clone()}
                          />
                      }
                  })
              }
          </ul>
      }
    }
  }
}
