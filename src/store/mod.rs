//! Persistence boundary.
//!
//! The board only talks to a [`TaskStore`]; the file-backed and in-memory
//! stores share the query semantics defined here.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::task::{Task, TaskDraft};

pub const DEFAULT_PAGE_LIMIT: usize = 100;

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks matching every predicate, newest first, capped at the page limit.
    async fn list(&self, predicates: &[Predicate]) -> Result<Vec<Task>, RemoteError>;
    /// Like `list` without the page cap; project statistics need every task.
    async fn list_all(&self, predicates: &[Predicate]) -> Result<Vec<Task>, RemoteError>;
    async fn create(&self, draft: TaskDraft, owner: Option<String>) -> Result<Task, RemoteError>;
    async fn update(&self, task: Task) -> Result<Task, RemoteError>;
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Status,
    Priority,
    Category,
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    ExactMatch,
    /// Case-insensitive substring
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: Field,
    pub operator: Operator,
    pub values: Vec<String>,
}

impl Predicate {
    pub fn exact(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            operator: Operator::ExactMatch,
            values: vec![value.into()],
        }
    }

    pub fn contains(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            operator: Operator::Contains,
            values: vec![value.into()],
        }
    }

    /// A task matches when its field matches any of the values.
    pub fn matches(&self, task: &Task) -> bool {
        let actual = field_value(task, self.field);
        self.values.iter().any(|v| match self.operator {
            Operator::ExactMatch => actual == v,
            Operator::Contains => actual.to_lowercase().contains(&v.to_lowercase()),
        })
    }
}

fn field_value(task: &Task, field: Field) -> &str {
    match field {
        Field::Title => &task.title,
        Field::Description => task.description_or_empty(),
        Field::Status => task.status.as_str(),
        Field::Priority => task.priority.as_str(),
        Field::Category => &task.category,
        Field::Owner => task.owner.as_deref().unwrap_or(""),
    }
}

/// Creates the starter tasks; used on first run against an empty store.
pub async fn seed_demo_tasks<S: TaskStore + ?Sized>(
    store: &S,
    owner: Option<String>,
) -> Result<usize, RemoteError> {
    let drafts = crate::task::demo_drafts(chrono::Local::now().date_naive());
    let count = drafts.len();
    for draft in drafts {
        store.create(draft, owner.clone()).await?;
    }
    Ok(count)
}

/// Applies predicates, orders newest first and caps the page.
pub(crate) fn run_query(tasks: &[Task], predicates: &[Predicate], limit: usize) -> Vec<Task> {
    let mut matched: Vec<Task> = tasks
        .iter()
        .filter(|t| predicates.iter().all(|p| p.matches(t)))
        .cloned()
        .collect();
    matched.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    matched.truncate(limit);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskStatus};
    use chrono::{Duration, Utc};

    fn task(title: &str, category: &str, age_minutes: i64) -> Task {
        let mut draft = TaskDraft::new(title);
        draft.category = category.to_string();
        let mut task = Task::from_draft(draft, None);
        task.created_at = Utc::now() - Duration::minutes(age_minutes);
        task
    }

    #[test]
    fn test_query_orders_newest_first() {
        let tasks = vec![task("old", "Work", 10), task("new", "Work", 1), task("mid", "Work", 5)];
        let titles: Vec<_> = run_query(&tasks, &[], 100)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_query_limit() {
        let tasks: Vec<_> = (0..5).map(|i| task("t", "Work", i)).collect();
        assert_eq!(run_query(&tasks, &[], 3).len(), 3);
    }

    #[test]
    fn test_exact_and_contains() {
        let tasks = vec![task("Write report", "Work", 1), task("Report card", "School", 2)];
        let work = run_query(&tasks, &[Predicate::exact(Field::Category, "Work")], 100);
        assert_eq!(work.len(), 1);

        let reports = run_query(&tasks, &[Predicate::contains(Field::Title, "REPORT")], 100);
        assert_eq!(reports.len(), 2);

        let both = run_query(
            &tasks,
            &[
                Predicate::contains(Field::Title, "report"),
                Predicate::exact(Field::Category, "School"),
            ],
            100,
        );
        assert_eq!(both[0].title, "Report card");
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn test_predicate_any_value() {
        let mut t = task("x", "Work", 1);
        t.priority = Priority::High;
        t.status = TaskStatus::InProgress;
        let p = Predicate {
            field: Field::Priority,
            operator: Operator::ExactMatch,
            values: vec!["Low".to_string(), "High".to_string()],
        };
        assert!(p.matches(&t));
        assert!(Predicate::exact(Field::Status, "In Progress").matches(&t));
        assert!(!Predicate::exact(Field::Owner, "ana").matches(&t));
    }
}
