use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::auth::{Route, User};
use crate::error::{RemoteError, Result, TaskflowError};
use crate::filter::{filter_tasks, Choice, FilterCriteria};
use crate::project::{aggregate, ProjectSummary, StatusCounts};
use crate::store::{Field, Predicate, TaskStore};
use crate::task::{Task, TaskDraft, TaskStatus};

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// A store call the board is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Fetch => "Loading tasks",
            Operation::Create => "Adding task",
            Operation::Update => "Saving task",
            Operation::Delete => "Deleting task",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created: Instant,
}

/// All mutable application state. The task list is a read-through cache of
/// the store and is re-fetched after every successful mutation.
pub struct TaskBoard {
    store: Arc<dyn TaskStore>,
    pub user: Option<User>,
    pub tasks: Vec<Task>,
    /// Every stored task, uncapped; projects are aggregated from this
    all_tasks: Vec<Task>,
    pub criteria: FilterCriteria,
    pub route: Route,
    pub selected_task: usize,
    pub selected_project: usize,
    pub dark_mode: bool,
    /// Status selection inside a project's detail view
    pub project_status: Choice<TaskStatus>,
    project_tasks: Vec<Task>,
    editing: Option<String>,
    pending: Option<Operation>,
    notices: VecDeque<Notice>,
    fetch_failed: bool,
}

impl TaskBoard {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            store,
            user: None,
            tasks: Vec::new(),
            all_tasks: Vec::new(),
            criteria: FilterCriteria::default(),
            route: Route::default(),
            selected_task: 0,
            selected_project: 0,
            dark_mode: false,
            project_status: Choice::All,
            project_tasks: Vec::new(),
            editing: None,
            pending: None,
            notices: VecDeque::new(),
            fetch_failed: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<Operation> {
        self.pending
    }

    /// Marks `op` in flight so the UI can draw it before awaiting.
    pub fn begin(&mut self, op: Operation) {
        self.pending = Some(op);
    }

    /// Whether the last fetch failed and a manual retry makes sense.
    pub fn can_retry(&self) -> bool {
        self.fetch_failed
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push_back(Notice {
            level,
            message: message.into(),
            created: Instant::now(),
        });
    }

    /// Newest notice still on screen.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.back()
    }

    pub fn expire_notices(&mut self, now: Instant) {
        self.notices
            .retain(|n| now.saturating_duration_since(n.created) < NOTICE_TTL);
    }

    fn fail(&mut self, context: &str, err: TaskflowError) -> TaskflowError {
        match &err {
            TaskflowError::Validation(msg) => {
                let msg = msg.clone();
                self.notify(NoticeLevel::Error, msg);
            }
            TaskflowError::Remote(RemoteError::Unauthenticated) => {
                warn!("{context}: not signed in");
                self.notify(NoticeLevel::Error, "Please sign in first.");
            }
            other => {
                error!(error = %other, "{context}");
                self.notify(NoticeLevel::Error, format!("{context}. Please try again."));
            }
        }
        err
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.pending = Some(Operation::Fetch);
        let result = match self.store.list(&[]).await {
            Ok(tasks) => self.store.list_all(&[]).await.map(|all| (tasks, all)),
            Err(err) => Err(err),
        };
        self.pending = None;
        match result {
            Ok((tasks, all)) => {
                self.tasks = tasks;
                self.all_tasks = all;
                self.fetch_failed = false;
                self.clamp_selection();
                if let Route::ProjectDetail(name) = self.route.clone() {
                    self.load_project(&name).await?;
                }
                Ok(())
            }
            Err(err) => {
                self.fetch_failed = true;
                Err(self.fail("Failed to load tasks", err.into()))
            }
        }
    }

    /// Creates a task, or updates the one being edited.
    pub async fn submit(&mut self, draft: TaskDraft) -> Result<()> {
        if let Err(err) = draft.validate() {
            return Err(self.fail("Invalid task", err));
        }
        // cleared by save_edit only once the store accepts the update
        match self.editing.clone() {
            Some(id) => self.save_edit(id, draft).await,
            None => self.create(draft).await,
        }
    }

    /// Name of the signed-in user; mutations are refused without one.
    fn require_user(&mut self, context: &str) -> Result<String> {
        if let Some(user) = &self.user {
            return Ok(user.name.clone());
        }
        Err(self.fail(context, RemoteError::Unauthenticated.into()))
    }

    async fn create(&mut self, draft: TaskDraft) -> Result<()> {
        let owner = self.require_user("Failed to add task")?;
        self.pending = Some(Operation::Create);
        let result = self.store.create(draft, Some(owner)).await;
        self.pending = None;
        match result {
            Ok(task) => {
                info!(id = %task.id, title = %task.title, "task created");
                self.notify(NoticeLevel::Success, "Task added successfully!");
                self.refresh().await
            }
            Err(err) => Err(self.fail("Failed to add task", err.into())),
        }
    }

    async fn save_edit(&mut self, id: String, draft: TaskDraft) -> Result<()> {
        self.require_user("Failed to update task")?;
        let Some(task) = self.find(&id).cloned() else {
            self.editing = None;
            return Err(self.fail("Failed to update task", RemoteError::NotFound(id).into()));
        };
        self.pending = Some(Operation::Update);
        let result = self.store.update(task.with_draft(draft)).await;
        self.pending = None;
        match result {
            Ok(task) => {
                info!(id = %task.id, "task updated");
                self.editing = None;
                self.notify(NoticeLevel::Success, "Task updated successfully!");
                self.refresh().await
            }
            Err(err) => Err(self.fail("Failed to update task", err.into())),
        }
    }

    pub async fn toggle_status(&mut self, id: &str) -> Result<()> {
        self.require_user("Failed to update task")?;
        let Some(mut task) = self.find(id).cloned() else {
            return Err(self.fail(
                "Failed to update task",
                RemoteError::NotFound(id.to_string()).into(),
            ));
        };
        task.status = task.status.toggled();
        let message = if task.is_completed() {
            "Task marked as completed!"
        } else {
            "Task reopened!"
        };
        self.pending = Some(Operation::Update);
        let result = self.store.update(task).await;
        self.pending = None;
        match result {
            Ok(task) => {
                info!(id = %task.id, status = %task.status, "task status toggled");
                self.notify(NoticeLevel::Info, message);
                self.refresh().await
            }
            Err(err) => Err(self.fail("Failed to update task", err.into())),
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.require_user("Failed to delete task")?;
        self.pending = Some(Operation::Delete);
        let result = self.store.delete(id).await;
        self.pending = None;
        match result {
            Ok(()) => {
                info!(id, "task deleted");
                if self.editing.as_deref() == Some(id) {
                    self.editing = None;
                }
                self.notify(NoticeLevel::Success, "Task deleted successfully!");
                self.refresh().await
            }
            Err(err) => Err(self.fail("Failed to delete task", err.into())),
        }
    }

    /// Puts a task into edit mode and returns its fields for the form.
    pub fn start_edit(&mut self, id: &str) -> Option<TaskDraft> {
        let draft = self.find(id).map(TaskDraft::from)?;
        self.editing = Some(id.to_string());
        Some(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Looks in the main list, then in the open project.
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks
            .iter()
            .chain(self.project_tasks.iter())
            .find(|t| t.id == id)
    }

    pub fn visible_tasks(&self) -> Vec<Task> {
        filter_tasks(&self.tasks, &self.criteria)
    }

    pub fn selected(&self) -> Option<Task> {
        self.visible_tasks().into_iter().nth(self.selected_task)
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.clamp_selection();
    }

    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = match self.route {
            Route::Projects => self.projects().len(),
            Route::ProjectDetail(_) => self.project_view_tasks().len(),
            _ => self.visible_tasks().len(),
        };
        let current = match self.route {
            Route::Projects => &mut self.selected_project,
            _ => &mut self.selected_task,
        };
        if len == 0 {
            *current = 0;
            return;
        }
        *current = (*current as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let visible = self.visible_tasks().len();
        self.selected_task = self.selected_task.min(visible.saturating_sub(1));
        let projects = self.projects().len();
        self.selected_project = self.selected_project.min(projects.saturating_sub(1));
    }

    pub fn projects(&self) -> Vec<ProjectSummary> {
        aggregate(&self.all_tasks)
    }

    /// Fetches one project's tasks from the store and shows its detail view.
    pub async fn load_project(&mut self, name: &str) -> Result<()> {
        self.pending = Some(Operation::Fetch);
        let result = self
            .store
            .list_all(&[Predicate::exact(Field::Category, name)])
            .await;
        self.pending = None;
        match result {
            Ok(tasks) => {
                let route = Route::ProjectDetail(name.to_string());
                if self.route != route {
                    self.route = route;
                    self.selected_task = 0;
                }
                self.project_tasks = tasks;
                let visible = self.project_view_tasks().len();
                self.selected_task = self.selected_task.min(visible.saturating_sub(1));
                Ok(())
            }
            Err(err) => Err(self.fail("Failed to load project tasks", err.into())),
        }
    }

    pub fn project_tasks(&self) -> &[Task] {
        &self.project_tasks
    }

    pub fn project_view_tasks(&self) -> Vec<Task> {
        let criteria = FilterCriteria {
            status: self.project_status.clone(),
            ..FilterCriteria::default()
        };
        filter_tasks(&self.project_tasks, &criteria)
    }

    pub fn project_counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.project_tasks)
    }

    /// Cycles All → Not Started → In Progress → Completed → All.
    pub fn cycle_project_status(&mut self) {
        self.project_status = cycle(&self.project_status, &TaskStatus::ALL);
        self.selected_task = 0;
    }

    pub fn navigate(&mut self, route: Route) {
        self.route = route;
        self.selected_task = 0;
        self.clamp_selection();
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}

/// Next selection in `All, options[0], options[1], ..., All`.
pub fn cycle<T: Clone + PartialEq>(current: &Choice<T>, options: &[T]) -> Choice<T> {
    match current {
        Choice::All => options.first().cloned().map_or(Choice::All, Choice::Only),
        Choice::Only(value) => {
            let idx = options.iter().position(|o| o == value);
            match idx.and_then(|i| options.get(i + 1)) {
                Some(next) => Choice::Only(next.clone()),
                None => Choice::All,
            }
        }
    }
}
