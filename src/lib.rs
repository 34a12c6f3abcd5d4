//! TaskFlow: tasks with status, priority, category and due date, filtered
//! and grouped into per-category projects.

pub mod auth;
pub mod board;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod project;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{RemoteError, Result, TaskflowError};
pub use filter::{filter_tasks, Choice, FilterCriteria};
pub use project::{aggregate, ProjectSummary, StatusCounts};
pub use task::{Priority, Task, TaskDraft, TaskStatus};
