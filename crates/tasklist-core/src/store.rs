use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::task::{Task, normalize_text};

/// Ordered task sequence; insertion order is the only order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a previously persisted sequence as-is.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.done).count()
    }

    pub fn completed_count(&self) -> usize {
        self.len() - self.active_count()
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Timestamp-derived id, bumped past the largest id already issued.
    ///
    /// Once `u64::MAX` is taken there is nothing left to bump to, so the id
    /// becomes the first free value at or after `now_millis`, wrapping to 0.
    pub fn next_id(&self, now_millis: u64) -> u64 {
        let Some(max) = self.tasks.iter().map(|task| task.id).max() else {
            return now_millis;
        };
        if let Some(floor) = max.checked_add(1) {
            return now_millis.max(floor);
        }

        warn!("task id space exhausted at the top; reusing a free id");
        let taken: BTreeSet<u64> = self.tasks.iter().map(|task| task.id).collect();
        let mut candidate = now_millis;
        while taken.contains(&candidate) {
            candidate = candidate.wrapping_add(1);
        }
        candidate
    }

    /// Appends a task built from `input`. Returns the new id, or `None` when
    /// the input was cancelled or blank.
    pub fn add(&mut self, input: Option<&str>, now_millis: u64) -> Option<u64> {
        let text = normalize_text(input)?;
        let id = self.next_id(now_millis);
        debug!(id, "appending task");
        self.tasks.push(Task::new(id, text));
        Some(id)
    }

    pub fn toggle(&mut self, id: u64) -> bool {
        let Some(idx) = self.position(id) else {
            debug!(id, "toggle: no such task");
            return false;
        };
        let task = &mut self.tasks[idx];
        task.done = !task.done;
        debug!(id, done = task.done, "toggled task");
        true
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let Some(idx) = self.position(id) else {
            debug!(id, "delete: no such task");
            return false;
        };
        self.tasks.remove(idx);
        debug!(id, "deleted task");
        true
    }

    /// Replaces the text of `id`. Blank or cancelled input leaves the task
    /// untouched.
    pub fn edit(&mut self, id: u64, input: Option<&str>) -> bool {
        let Some(text) = normalize_text(input) else {
            return false;
        };
        let Some(idx) = self.position(id) else {
            debug!(id, "edit: no such task");
            return false;
        };
        self.tasks[idx].text = text;
        debug!(id, "edited task");
        true
    }

    /// Drops every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.done);
        let removed = before - self.tasks.len();
        debug!(removed, "cleared completed tasks");
        removed
    }
}
