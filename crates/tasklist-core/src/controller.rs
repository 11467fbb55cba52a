use tracing::{debug, error, info};

use crate::config::Config;
use crate::filter::Filter;
use crate::render::{TaskListView, render};
use crate::storage::{KeyValueStore, Persistence};
use crate::store::TaskStore;
use crate::theme::Theme;

pub const ADD_PROMPT: &str = "Enter a new task:";
pub const EDIT_PROMPT: &str = "Edit your task:";

/// Modal text entry. `None` means the user dismissed the prompt.
pub trait TextPrompt {
    fn prompt(&self, message: &str, default: Option<&str>) -> Option<String>;
}

/// Everything the app mutates. The filter lives here but is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AppState {
    tasks: TaskStore,
    filter: Filter,
    theme: Theme,
}

/// Owns the app state and its storage. Every mutating command writes the
/// full task list through to storage, then rebuilds the view. A failed write
/// leaves state and view as they were.
#[derive(Debug, Clone)]
pub struct TaskListController<S> {
    state: AppState,
    persistence: Persistence<S>,
    placeholder: String,
    view: TaskListView,
}

impl<S: KeyValueStore> TaskListController<S> {
    /// Restores tasks and theme from `storage`. Unreadable or malformed
    /// task data is logged and replaced by an empty list; the filter always
    /// starts at `all`.
    #[tracing::instrument(skip_all)]
    pub fn open(storage: S, cfg: &Config) -> Self {
        let persistence = Persistence::new(storage, cfg);

        let tasks = persistence.load_tasks().unwrap_or_else(|err| {
            error!(
                error = %format!("{err:#}"),
                "failed loading stored tasks; starting with an empty list"
            );
            TaskStore::new()
        });

        let theme = persistence.load_theme().unwrap_or_else(|err| {
            error!(
                error = %format!("{err:#}"),
                "failed loading stored theme; using default"
            );
            cfg.theme.default
        });

        let state = AppState {
            tasks,
            filter: Filter::All,
            theme,
        };
        let placeholder = cfg.view.empty_placeholder.clone();
        let view = render(&state.tasks, state.filter, &placeholder);

        info!(
            tasks = state.tasks.len(),
            theme = %state.theme,
            "opened task list"
        );

        Self {
            state,
            persistence,
            placeholder,
            view,
        }
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.state.tasks
    }

    pub fn filter(&self) -> Filter {
        self.state.filter
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// The list as last rendered.
    pub fn view(&self) -> &TaskListView {
        &self.view
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    pub fn into_storage(self) -> S {
        self.persistence.into_storage()
    }

    pub fn task_text(&self, id: u64) -> Option<&str> {
        self.state.tasks.get(id).map(|task| task.text.as_str())
    }

    fn refresh_view(&mut self) {
        self.view = render(&self.state.tasks, self.state.filter, &self.placeholder);
    }

    /// Writes `next` through and only then adopts it.
    fn commit(&mut self, next: TaskStore) -> anyhow::Result<()> {
        self.persistence.save_tasks(&next)?;
        self.state.tasks = next;
        self.refresh_view();
        Ok(())
    }

    /// Returns the new task's id, or `None` for blank/cancelled input.
    #[tracing::instrument(skip(self, input))]
    pub fn add(&mut self, input: Option<&str>, now_millis: u64) -> anyhow::Result<Option<u64>> {
        let mut next = self.state.tasks.clone();
        let Some(id) = next.add(input, now_millis) else {
            debug!("add abandoned");
            return Ok(None);
        };
        self.commit(next)?;
        Ok(Some(id))
    }

    pub fn add_with_prompt(
        &mut self,
        prompt: &impl TextPrompt,
        now_millis: u64,
    ) -> anyhow::Result<Option<u64>> {
        let input = prompt.prompt(ADD_PROMPT, None);
        self.add(input.as_deref(), now_millis)
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle(&mut self, id: u64) -> anyhow::Result<bool> {
        let mut next = self.state.tasks.clone();
        if !next.toggle(id) {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    #[tracing::instrument(skip(self, input))]
    pub fn edit(&mut self, id: u64, input: Option<&str>) -> anyhow::Result<bool> {
        let mut next = self.state.tasks.clone();
        if !next.edit(id, input) {
            debug!("edit abandoned");
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Prompts pre-filled with the task's current text.
    pub fn edit_with_prompt(&mut self, id: u64, prompt: &impl TextPrompt) -> anyhow::Result<bool> {
        let Some(current) = self.task_text(id) else {
            return Ok(false);
        };
        let input = prompt.prompt(EDIT_PROMPT, Some(current));
        self.edit(id, input.as_deref())
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: u64) -> anyhow::Result<bool> {
        let mut next = self.state.tasks.clone();
        if !next.delete(id) {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Always writes through, even when nothing was completed.
    #[tracing::instrument(skip(self))]
    pub fn clear_completed(&mut self) -> anyhow::Result<usize> {
        let mut next = self.state.tasks.clone();
        let removed = next.clear_completed();
        self.commit(next)?;
        Ok(removed)
    }

    /// Filter changes only re-render.
    pub fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "filter changed");
        self.state.filter = filter;
        self.refresh_view();
    }

    /// Persists first, then records the applied theme.
    #[tracing::instrument(skip(self))]
    pub fn set_theme(&mut self, theme: Theme) -> anyhow::Result<()> {
        self.persistence.save_theme(theme)?;
        self.state.theme = theme;
        Ok(())
    }

    /// Theme toggle control: checked is light.
    pub fn set_theme_checked(&mut self, checked: bool) -> anyhow::Result<Theme> {
        let theme = Theme::from_checked(checked);
        self.set_theme(theme)?;
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use anyhow::bail;

    use super::*;
    use crate::storage::MemoryStore;

    struct ScriptedPrompt {
        answers: RefCell<VecDeque<Option<String>>>,
        seen: RefCell<Vec<(String, Option<String>)>>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
                seen: RefCell::new(vec![]),
            }
        }
    }

    impl TextPrompt for ScriptedPrompt {
        fn prompt(&self, message: &str, default: Option<&str>) -> Option<String> {
            self.seen
                .borrow_mut()
                .push((message.to_string(), default.map(str::to_string)));
            self.answers.borrow_mut().pop_front().flatten()
        }
    }

    /// Serves reads from the wrapped store and refuses every write.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.0.get_item(key)
        }

        fn set_item(&mut self, key: &str, _value: &str) -> anyhow::Result<()> {
            bail!("quota exceeded writing '{key}'")
        }
    }

    fn controller() -> TaskListController<MemoryStore> {
        TaskListController::open(MemoryStore::new(), &Config::default())
    }

    fn read_only(storage: MemoryStore) -> TaskListController<ReadOnlyStore> {
        TaskListController::open(ReadOnlyStore(storage), &Config::default())
    }

    #[test]
    fn opens_empty_with_defaults() {
        let c = controller();
        assert!(c.tasks().is_empty());
        assert_eq!(c.filter(), Filter::All);
        assert_eq!(c.theme(), Theme::Dark);
        assert_eq!(c.view().placeholder(), Some("No tasks pending."));
    }

    #[test]
    fn malformed_storage_falls_back_to_empty() {
        let storage = MemoryStore::new()
            .with_item("tasks", "[{\"id\":")
            .with_item("theme", "light");
        let c = TaskListController::open(storage, &Config::default());
        assert!(c.tasks().is_empty());
        assert_eq!(c.theme(), Theme::Light);
    }

    #[test]
    fn no_op_commands_do_not_write() {
        let mut c = controller();
        assert_eq!(c.add(Some("  "), 1).expect("add"), None);
        assert!(!c.toggle(1).expect("toggle"));
        assert_eq!(c.storage().get_item("tasks").expect("get"), None);
    }

    #[test]
    fn failed_write_leaves_an_empty_list_empty() {
        let mut c = read_only(MemoryStore::new());
        let before = c.view().clone();

        let err = c.add(Some("Buy milk"), 1).expect_err("write refused");
        assert!(format!("{err:#}").contains("quota exceeded"));

        assert!(c.tasks().is_empty());
        assert_eq!(c.view(), &before);
        assert_eq!(c.storage().get_item("tasks").expect("get"), None);
    }

    #[test]
    fn failed_write_keeps_stored_tasks_as_they_were() {
        let stored = r#"[{"id":1,"text":"a","done":false},{"id":2,"text":"b","done":true}]"#;
        let mut c = read_only(MemoryStore::new().with_item("tasks", stored));
        let tasks = c.tasks().clone();
        let view = c.view().clone();

        assert!(c.toggle(1).is_err());
        assert!(c.edit(1, Some("changed")).is_err());
        assert!(c.delete(2).is_err());
        assert!(c.clear_completed().is_err());

        assert_eq!(c.tasks(), &tasks);
        assert_eq!(c.view(), &view);
        assert_eq!(c.storage().get_item("tasks").expect("get").as_deref(), Some(stored));
    }

    #[test]
    fn failed_theme_write_keeps_the_applied_theme() {
        let mut c = read_only(MemoryStore::new());
        assert!(c.set_theme_checked(true).is_err());
        assert_eq!(c.theme(), Theme::Dark);
        assert!(!c.theme().is_checked());
        assert_eq!(c.storage().get_item("theme").expect("get"), None);
    }

    #[test]
    fn prompts_drive_add_and_edit() {
        let mut c = controller();
        let prompt = ScriptedPrompt::new(&[
            Some(" Buy milk "),
            None,
            Some("Buy oat milk"),
            Some("   "),
        ]);

        let id = c
            .add_with_prompt(&prompt, 100)
            .expect("add")
            .expect("created");
        assert_eq!(c.add_with_prompt(&prompt, 101).expect("cancelled add"), None);
        assert!(c.edit_with_prompt(id, &prompt).expect("edit"));
        assert!(!c.edit_with_prompt(id, &prompt).expect("blank edit"));

        assert_eq!(c.task_text(id), Some("Buy oat milk"));
        assert_eq!(c.tasks().len(), 1);

        let seen = prompt.seen.borrow();
        assert_eq!(seen[0], (ADD_PROMPT.to_string(), None));
        assert_eq!(
            seen[2],
            (EDIT_PROMPT.to_string(), Some("Buy milk".to_string()))
        );
        assert_eq!(seen[3].1.as_deref(), Some("Buy oat milk"));
    }

    #[test]
    fn edit_prompt_skipped_for_unknown_id() {
        let mut c = controller();
        let prompt = ScriptedPrompt::new(&[Some("x")]);
        assert!(!c.edit_with_prompt(9, &prompt).expect("edit"));
        assert!(prompt.seen.borrow().is_empty());
    }

    #[test]
    fn filter_is_not_persisted() {
        let mut c = controller();
        c.add(Some("a"), 1).expect("add");
        c.set_filter(Filter::Completed);
        assert_eq!(c.view().filter, Filter::Completed);

        let reopened = TaskListController::open(c.into_storage(), &Config::default());
        assert_eq!(reopened.filter(), Filter::All);
        assert_eq!(reopened.tasks().len(), 1);
    }

    #[test]
    fn theme_toggle_persists_and_survives_reopen() {
        let mut c = controller();
        assert_eq!(c.theme(), Theme::Dark);
        assert_eq!(c.set_theme_checked(true).expect("toggle"), Theme::Light);
        assert_eq!(
            c.storage().get_item("theme").expect("get").as_deref(),
            Some("light")
        );

        let reopened = TaskListController::open(c.into_storage(), &Config::default());
        assert_eq!(reopened.theme(), Theme::Light);
    }
}
