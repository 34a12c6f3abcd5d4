//! Client-side task filtering.
//!
//! All criteria combine with AND semantics. Each selection is either `All`
//! (no constraint) or a single value that must match exactly.

use std::fmt;

use crate::task::{Priority, Task, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("All"),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub status: Choice<TaskStatus>,
    pub priority: Choice<Priority>,
    pub category: Choice<String>,
    pub search_text: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Choice::Only(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Choice::Only(priority);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Choice::Only(category.into());
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// True when any criterion narrows the list.
    pub fn is_active(&self) -> bool {
        !(self.status.is_all()
            && self.priority.is_all()
            && self.category.is_all()
            && self.search_text.is_empty())
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.admits(&task.status)
            && self.priority.admits(&task.priority)
            && self.category.admits(&task.category)
            && matches_search(task, &self.search_text)
    }
}

/// Case-insensitive substring test over title and description.
pub fn matches_search(task: &Task, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.description_or_empty().to_lowercase().contains(&needle)
}

/// Returns the tasks matching every active criterion, in input order.
pub fn filter_tasks(tasks: &[Task], criteria: &FilterCriteria) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect()
}
