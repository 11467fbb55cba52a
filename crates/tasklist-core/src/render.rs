use crate::filter::Filter;
use crate::store::TaskStore;

/// One visible row. Actions on it address the task by `id`, never by the
/// row's position in the filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

impl TaskRow {
    pub fn row_class(&self) -> &'static str {
        if self.done { "completed" } else { "" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// Shown instead of an empty list.
    Placeholder(String),
    Rows(Vec<TaskRow>),
}

/// Everything a front end needs to draw the list, rebuilt in full after
/// every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub filter: Filter,
    pub body: ListBody,
    pub active_count: usize,
    pub completed_count: usize,
}

impl TaskListView {
    pub fn rows(&self) -> &[TaskRow] {
        match &self.body {
            ListBody::Rows(rows) => rows,
            ListBody::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.body {
            ListBody::Placeholder(text) => Some(text.as_str()),
            ListBody::Rows(_) => None,
        }
    }

    pub fn items_left_label(&self) -> String {
        match self.active_count {
            1 => "1 item left".to_string(),
            n => format!("{n} items left"),
        }
    }
}

pub fn render(store: &TaskStore, filter: Filter, placeholder: &str) -> TaskListView {
    let rows: Vec<TaskRow> = filter
        .apply(store.tasks())
        .map(|task| TaskRow {
            id: task.id,
            text: task.text.clone(),
            done: task.done,
        })
        .collect();

    let body = if rows.is_empty() {
        ListBody::Placeholder(placeholder.to_string())
    } else {
        ListBody::Rows(rows)
    };

    TaskListView {
        filter,
        body,
        active_count: store.active_count(),
        completed_count: store.completed_count(),
    }
}
