use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{run_query, Predicate, TaskStore, DEFAULT_PAGE_LIMIT};
use crate::error::RemoteError;
use crate::task::{Task, TaskDraft};

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list(&self, predicates: &[Predicate]) -> Result<Vec<Task>, RemoteError> {
        let tasks = self.tasks.lock().await;
        Ok(run_query(&tasks, predicates, DEFAULT_PAGE_LIMIT))
    }

    async fn list_all(&self, predicates: &[Predicate]) -> Result<Vec<Task>, RemoteError> {
        let tasks = self.tasks.lock().await;
        Ok(run_query(&tasks, predicates, usize::MAX))
    }

    async fn create(&self, draft: TaskDraft, owner: Option<String>) -> Result<Task, RemoteError> {
        let task = Task::from_draft(draft, owner);
        self.tasks.lock().await.push(task.clone());
        Ok(task)
    }

    async fn update(&self, mut task: Task) -> Result<Task, RemoteError> {
        let mut tasks = self.tasks.lock().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| RemoteError::NotFound(task.id.clone()))?;
        task.modified_at = Some(Utc::now());
        *slot = task.clone();
        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let mut tasks = self.tasks.lock().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(RemoteError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
