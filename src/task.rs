use std::fmt;

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TaskflowError};

pub const CATEGORIES: [&str; 5] = ["Work", "Personal", "Health", "Learning", "Other"];
pub const DEFAULT_CATEGORY: &str = "Personal";

/// Task status. Records written by other clients may carry a status string
/// we don't know; it is kept verbatim instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Unrecognized(String),
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TaskStatus::Unrecognized(_))
    }

    /// Lenient parse for user input: "in progress", "in-progress", "InProgress".
    pub fn parse(input: &str) -> Option<Self> {
        match squash(input).as_str() {
            "notstarted" | "todo" => Some(TaskStatus::NotStarted),
            "inprogress" | "doing" => Some(TaskStatus::InProgress),
            "completed" | "done" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// Completed reopens to Not Started; everything else completes.
    pub fn toggled(&self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::NotStarted,
            _ => TaskStatus::Completed,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Not Started" => TaskStatus::NotStarted,
            "In Progress" => TaskStatus::InProgress,
            "Completed" => TaskStatus::Completed,
            _ => TaskStatus::Unrecognized(raw),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match squash(input).as_str() {
            "low" => Some(Priority::Low),
            "medium" | "med" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn squash(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Maps free-form input onto the known categories; anything else is "Other".
pub fn normalize_category(input: &str) -> String {
    let trimmed = input.trim();
    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(trimmed))
        .unwrap_or(&"Other")
        .to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Builds a new record with a fresh id and creation timestamp.
    pub fn from_draft(draft: TaskDraft, owner: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            created_at: Utc::now(),
            modified_at: None,
            owner,
            tags: draft.tags,
        }
    }

    /// Replaces the editable fields, keeping id, owner and creation time.
    pub fn with_draft(mut self, draft: TaskDraft) -> Self {
        self.title = draft.title.trim().to_string();
        self.description = draft.description;
        self.status = draft.status;
        self.priority = draft.priority;
        self.category = draft.category;
        self.due_date = draft.due_date;
        self.tags = draft.tags;
        self
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// The editable fields of a task, as entered in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub category: String,
    pub due_date: NaiveDate,
    pub tags: Vec<String>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            status: TaskStatus::NotStarted,
            priority: Priority::Medium,
            category: DEFAULT_CATEGORY.to_string(),
            due_date: Local::now().date_naive(),
            tags: Vec::new(),
        }
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.clone(),
            priority: task.priority,
            category: task.category.clone(),
            due_date: task.due_date,
            tags: task.tags.clone(),
        }
    }
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TaskflowError::validation("Task title cannot be empty!"));
        }
        if !self.status.is_recognized() {
            return Err(TaskflowError::validation(format!(
                "Unknown status \"{}\"",
                self.status
            )));
        }
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` due date; blank input means today.
pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        TaskflowError::validation(format!("Invalid due date \"{trimmed}\", expected YYYY-MM-DD"))
    })
}

/// Starter tasks shown to a brand new user.
pub fn demo_drafts(today: NaiveDate) -> Vec<TaskDraft> {
    vec![
        TaskDraft {
            title: "Complete project proposal".to_string(),
            description: Some("Finish the project proposal for client meeting".to_string()),
            status: TaskStatus::InProgress,
            priority: Priority::High,
            category: "Work".to_string(),
            due_date: today.checked_add_days(Days::new(2)).unwrap_or(today),
            tags: Vec::new(),
        },
        TaskDraft {
            title: "Grocery shopping".to_string(),
            description: Some("Buy groceries for the week".to_string()),
            status: TaskStatus::NotStarted,
            priority: Priority::Medium,
            category: "Personal".to_string(),
            due_date: today.checked_add_days(Days::new(1)).unwrap_or(today),
            tags: Vec::new(),
        },
        TaskDraft {
            title: "Exercise routine".to_string(),
            description: Some("30 minutes cardio workout".to_string()),
            status: TaskStatus::Completed,
            priority: Priority::Low,
            category: "Health".to_string(),
            due_date: today,
            tags: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_display_form() {
        let json = serde_json::to_string(&TaskStatus::NotStarted).unwrap();
        assert_eq!(json, "\"Not Started\"");
        let parsed: TaskStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn test_unknown_status_is_kept_verbatim() {
        let parsed: TaskStatus = serde_json::from_str("\"Blocked\"").unwrap();
        assert_eq!(parsed, TaskStatus::Unrecognized("Blocked".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Blocked\"");
        // display form is case-sensitive
        let lower: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert!(!lower.is_recognized());
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(TaskStatus::parse("in progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("Not-Started"), Some(TaskStatus::NotStarted));
        assert_eq!(TaskStatus::parse("blocked"), None);
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::NotStarted);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::NotStarted.toggled(), TaskStatus::Completed);
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("work"), "Work");
        assert_eq!(normalize_category("  Health "), "Health");
        assert_eq!(normalize_category("Gardening"), "Other");
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let err = TaskDraft::new("   ").validate().unwrap_err();
        assert!(err.is_validation());
        assert!(TaskDraft::new("Run").validate().is_ok());

        let mut draft = TaskDraft::new("Run");
        draft.status = TaskStatus::Unrecognized("Blocked".to_string());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(
            parse_due_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(parse_due_date("").unwrap(), Local::now().date_naive());
        assert!(parse_due_date("03/01/2024").is_err());
    }

    #[test]
    fn test_with_draft_keeps_identity() {
        let task = Task::from_draft(TaskDraft::new(" Report "), Some("ana".to_string()));
        assert_eq!(task.title, "Report");
        let mut draft = TaskDraft::from(&task);
        draft.title = "Quarterly report".to_string();
        let edited = task.clone().with_draft(draft);
        assert_eq!(edited.id, task.id);
        assert_eq!(edited.owner.as_deref(), Some("ana"));
        assert_eq!(edited.created_at, task.created_at);
        assert_eq!(edited.title, "Quarterly report");
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let json = r#"{
            "id": "1",
            "title": "Run",
            "status": "Completed",
            "priority": "Low",
            "dueDate": "2024-01-02",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description_or_empty(), "");
        assert_eq!(task.category, "");
        assert!(task.tags.is_empty());
    }
}
