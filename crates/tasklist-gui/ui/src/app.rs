use gloo::console::log;
use tasklist_core::{
  Config,
  Filter,
  TaskListController
};
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  UseStateHandle,
  function_component,
  html,
  use_effect_with,
  use_node_ref,
  use_state
};

use crate::browser::{
  BrowserPrompt,
  BrowserStorage,
  apply_body_theme,
  now_millis
};
use crate::components::{
  AddTaskButton,
  FilterBar,
  TaskList,
  ThemeToggle
};

type Controller =
  TaskListController<BrowserStorage>;

const CONFIG_TOML: &str =
  include_str!("../assets/tasklist.toml");

fn load_config() -> Config {
  match Config::from_toml_str(
    CONFIG_TOML
  ) {
    | Ok(cfg) => cfg,
    | Err(error) => {
      tracing::error!(
        error = %format!("{error:#}"),
        "failed parsing embedded \
         config; using defaults"
      );
      Config::default()
    }
  }
}

fn open_controller() -> Controller {
  TaskListController::open(
    BrowserStorage,
    &load_config()
  )
}

/// Applies `command` to a copy of the state and commits the copy only when
/// the write-through succeeded, so memory never drifts from storage.
fn run_command<T>(
  app: &UseStateHandle<Controller>,
  event: &str,
  command: impl FnOnce(
    &mut Controller
  ) -> anyhow::Result<T>
) -> Option<T> {
  let mut next = (**app).clone();
  match command(&mut next) {
    | Ok(value) => {
      app.set(next);
      Some(value)
    }
    | Err(error) => {
      tracing::error!(
        event,
        error = %format!("{error:#}"),
        "command failed; state left \
         unchanged"
      );
      None
    }
  }
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

#[function_component(App)]
pub fn app() -> Html {
  let app = use_state(open_controller);
  let theme = app.theme();
  let toggle_ref = use_node_ref();

  {
    use_effect_with(
      theme,
      move |theme| {
        apply_body_theme(*theme);
        tracing::debug!(
          theme = %theme,
          "applied theme"
        );
        || ()
      }
    );
  }

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and state \
         restored"
      );
      || ()
    });
  }

  let on_add = {
    let app = app.clone();
    Callback::from(move |()| {
      let added =
        run_command(&app, "task.add", |c| {
          c.add_with_prompt(
            &BrowserPrompt,
            now_millis()
          )
        });
      if let Some(Some(id)) = added {
        ui_debug(
          "task.add",
          &format!("id={id}")
        );
      }
    })
  };

  let on_toggle = {
    let app = app.clone();
    Callback::from(move |id: u64| {
      run_command(
        &app,
        "task.toggle",
        |c| c.toggle(id)
      );
    })
  };

  let on_edit = {
    let app = app.clone();
    Callback::from(move |id: u64| {
      let edited = run_command(
        &app,
        "task.edit",
        |c| {
          c.edit_with_prompt(
            id,
            &BrowserPrompt
          )
        }
      );
      if edited == Some(true) {
        ui_debug(
          "task.edit",
          &format!("id={id}")
        );
      }
    })
  };

  let on_delete = {
    let app = app.clone();
    Callback::from(move |id: u64| {
      run_command(
        &app,
        "task.delete",
        |c| c.delete(id)
      );
    })
  };

  let on_clear_completed = {
    let app = app.clone();
    Callback::from(move |()| {
      if let Some(removed) = run_command(
        &app,
        "task.clear_completed",
        Controller::clear_completed
      ) {
        ui_debug(
          "task.clear_completed",
          &format!("removed={removed}")
        );
      }
    })
  };

  let on_filter = {
    let app = app.clone();
    Callback::from(
      move |filter: Filter| {
        let mut next = (*app).clone();
        next.set_filter(filter);
        app.set(next);
      }
    )
  };

  let on_theme_change = {
    let app = app.clone();
    let toggle_ref = toggle_ref.clone();
    Callback::from(
      move |checked: bool| {
        let applied = run_command(
          &app,
          "theme.toggle",
          |c| c.set_theme_checked(checked)
        );
        // The browser already flipped the box; undo that when the theme
        // did not change.
        if applied.is_none() {
          if let Some(input) = toggle_ref
            .cast::<HtmlInputElement>()
          {
            input.set_checked(
              app.theme().is_checked()
            );
          }
        }
      }
    )
  };

  let view = app.view().clone();
  let active_filter = view.filter;
  let items_left =
    view.items_left_label();

  html! {
      <div class="app">
          <div class="header">
              <h1>{ "Tasks" }</h1>
              <ThemeToggle
                  checked={theme.is_checked()}
                  input_ref={toggle_ref}
                  on_change={on_theme_change}
              />
          </div>
          <FilterBar
              active={active_filter}
              items_left={items_left}
              on_select={on_filter}
              on_clear_completed={on_clear_completed}
          />
          <TaskList
              view={view}
              on_toggle={on_toggle}
              on_edit={on_edit}
              on_delete={on_delete}
          />
          <AddTaskButton on_add={on_add} />
      </div>
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn embedded_config_uses_the_standard_keys()
  {
    let cfg =
      Config::from_toml_str(CONFIG_TOML)
        .expect("embedded config parses");
    assert_eq!(cfg, Config::default());
  }
}
