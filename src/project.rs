//! Projects are not stored; they are tasks grouped by category.

use serde::Serialize;

use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    /// Tallies recognized statuses. Unrecognized ones are skipped.
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            counts.record(&task.status);
        }
        counts
    }

    fn record(&mut self, status: &TaskStatus) {
        match status {
            TaskStatus::NotStarted => self.not_started += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
            TaskStatus::Unrecognized(_) => {}
        }
    }

    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    pub task_count: usize,
    pub status_counts: StatusCounts,
}

impl ProjectSummary {
    pub fn completion_percentage(&self) -> u32 {
        completion_percentage(self.status_counts.completed, self.task_count)
    }
}

/// `round(100 * completed / total)`, or 0 for an empty project.
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as u32
}

/// Groups tasks by category in first-seen order. Tasks without a category
/// belong to no project.
pub fn aggregate(tasks: &[Task]) -> Vec<ProjectSummary> {
    let mut projects: Vec<ProjectSummary> = Vec::new();
    for task in tasks.iter().filter(|t| !t.category.is_empty()) {
        let idx = match projects.iter().position(|p| p.name == task.category) {
            Some(idx) => idx,
            None => {
                projects.push(ProjectSummary {
                    name: task.category.clone(),
                    task_count: 0,
                    status_counts: StatusCounts::default(),
                });
                projects.len() - 1
            }
        };
        let project = &mut projects[idx];
        project.task_count += 1;
        project.status_counts.record(&task.status);
    }
    projects
}
