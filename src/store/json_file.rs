use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::{run_query, Predicate, TaskStore, DEFAULT_PAGE_LIMIT};
use crate::error::RemoteError;
use crate::task::{Task, TaskDraft};

/// Keeps every task in one pretty-printed JSON array on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    page_limit: usize,
    // serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
            lock: Mutex::new(()),
        }
    }

    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn load(&self) -> Result<Vec<Task>, RemoteError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), RemoteError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(tasks)?).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn list(&self, predicates: &[Predicate]) -> Result<Vec<Task>, RemoteError> {
        let _guard = self.lock.lock().await;
        let tasks = self.load().await?;
        debug!(path = %self.path.display(), total = tasks.len(), "listing tasks");
        Ok(run_query(&tasks, predicates, self.page_limit))
    }

    async fn list_all(&self, predicates: &[Predicate]) -> Result<Vec<Task>, RemoteError> {
        let _guard = self.lock.lock().await;
        let tasks = self.load().await?;
        Ok(run_query(&tasks, predicates, usize::MAX))
    }

    async fn create(&self, draft: TaskDraft, owner: Option<String>) -> Result<Task, RemoteError> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?;
        let task = Task::from_draft(draft, owner);
        tasks.push(task.clone());
        self.save(&tasks).await?;
        Ok(task)
    }

    async fn update(&self, mut task: Task) -> Result<Task, RemoteError> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| RemoteError::NotFound(task.id.clone()))?;
        task.modified_at = Some(Utc::now());
        *slot = task.clone();
        self.save(&tasks).await?;
        Ok(task)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.load().await?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(RemoteError::NotFound(id.to_string()));
        }
        self.save(&tasks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Field;
    use crate::task::TaskStatus;
    use tempfile::tempdir;

    #[tokio::test(flavor = "current_thread")]
    async fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        assert!(!store.exists().await);
        assert!(store.list(&[]).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_crud_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.json");
        let store = JsonFileStore::new(&path);

        let created = store
            .create(TaskDraft::new("Run"), Some("ana".to_string()))
            .await
            .unwrap();
        assert_eq!(created.owner.as_deref(), Some("ana"));
        assert!(created.modified_at.is_none());

        let mut edited = created.clone();
        edited.status = TaskStatus::Completed;
        let updated = store.update(edited).await.unwrap();
        assert!(updated.modified_at.is_some());

        let reopened = JsonFileStore::new(&path);
        let tasks = reopened.list(&[]).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Completed);

        reopened.delete(&created.id).await.unwrap();
        assert!(store.list(&[]).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unknown_ids_are_not_found() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        let ghost = Task::from_draft(TaskDraft::new("ghost"), None);
        assert!(matches!(store.update(ghost).await, Err(RemoteError::NotFound(_))));
        assert!(matches!(store.delete("nope").await, Err(RemoteError::NotFound(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_corrupt_file_is_remote_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.list(&[]).await, Err(RemoteError::Corrupt(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_list_applies_predicates_and_limit() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json")).with_page_limit(2);
        for (title, category) in [("a", "Work"), ("b", "Home"), ("c", "Work"), ("d", "Work")] {
            let mut draft = TaskDraft::new(title);
            draft.category = category.to_string();
            store.create(draft, None).await.unwrap();
        }
        assert_eq!(store.list(&[]).await.unwrap().len(), 2);
        let home = store
            .list(&[Predicate::exact(Field::Category, "Home")])
            .await
            .unwrap();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].title, "b");

        let work = store
            .list_all(&[Predicate::exact(Field::Category, "Work")])
            .await
            .unwrap();
        assert_eq!(work.len(), 3);
        assert_eq!(store.list_all(&[]).await.unwrap().len(), 4);
    }
}
