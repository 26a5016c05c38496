//! Task store: cached task collection plus the kanban status transition.

use chrono::Utc;
use hive_client::ApiClient;
use hive_core::{EntityId, NewTask, Result, Session, Task, TaskPatch, TaskStatus};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Snapshot of the task store's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskState {
    /// Cached task collection, at most one entry per id.
    pub tasks: Vec<Task>,
    /// The current-task slot, filled by `fetch_task`.
    pub current_task: Option<Task>,
    /// True while a fetch is in flight.
    pub is_loading: bool,
}

/// Caches the task collection fetched from the remote API.
///
/// Same shape as the project store, plus [`update_task_status`]: a targeted
/// server-confirmed status transition used by kanban drag/drop and inline
/// controls. The store enforces no status ordering: any status is
/// reachable from any other.
///
/// [`update_task_status`]: TaskStore::update_task_status
pub struct TaskStore {
    api: ApiClient,
    session: watch::Receiver<Session>,
    tx: watch::Sender<TaskState>,
    fetch_generation: AtomicU64,
}

impl TaskStore {
    /// Creates a store reading its bearer credential from `session`.
    pub fn new(api: ApiClient, session: watch::Receiver<Session>) -> Self {
        let (tx, _rx) = watch::channel(TaskState::default());
        Self {
            api,
            session,
            tx,
            fetch_generation: AtomicU64::new(0),
        }
    }

    /// A snapshot of the store state.
    pub fn state(&self) -> TaskState {
        self.tx.borrow().clone()
    }

    /// A snapshot of the cached collection.
    pub fn tasks(&self) -> Vec<Task> {
        self.tx.borrow().tasks.clone()
    }

    /// A snapshot of the current-task slot.
    pub fn current_task(&self) -> Option<Task> {
        self.tx.borrow().current_task.clone()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.tx.subscribe()
    }

    fn bearer(&self) -> Result<String> {
        self.session
            .borrow()
            .token()
            .map(str::to_string)
            .ok_or_else(|| hive_core::Error::auth("not authenticated"))
    }

    fn begin_fetch(&self) -> u64 {
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.tx.send_modify(|s| s.is_loading = true);
        generation
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.fetch_generation.load(Ordering::SeqCst) != generation
    }

    /// Replaces the cache with the full collection from the server.
    ///
    /// The loading flag is true for the duration and reset on both success
    /// and failure. A completion superseded by a newer fetch is discarded.
    pub async fn fetch_tasks(&self) -> Result<()> {
        let token = self.bearer()?;
        let generation = self.begin_fetch();
        let result = self.api.list_tasks(&token).await;
        if self.is_superseded(generation) {
            tracing::debug!("discarding superseded task fetch");
            return Ok(());
        }
        match result {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "fetched tasks");
                self.tx.send_modify(|s| {
                    s.tasks = tasks;
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                self.tx.send_modify(|s| s.is_loading = false);
                Err(e)
            }
        }
    }

    /// Loads a single task into the current-task slot.
    ///
    /// An absent id is a valid result, not an error: the slot is emptied.
    pub async fn fetch_task(&self, id: &EntityId) -> Result<()> {
        let token = self.bearer()?;
        let generation = self.begin_fetch();
        let result = self.api.list_tasks(&token).await;
        if self.is_superseded(generation) {
            tracing::debug!("discarding superseded task fetch");
            return Ok(());
        }
        match result {
            Ok(tasks) => {
                let current = tasks.into_iter().find(|t| &t.id == id);
                self.tx.send_modify(|s| {
                    s.current_task = current;
                    s.is_loading = false;
                });
                Ok(())
            }
            Err(e) => {
                self.tx.send_modify(|s| s.is_loading = false);
                Err(e)
            }
        }
    }

    /// Optimistically creates a task in the local cache.
    pub fn create_task(&self, draft: NewTask) -> Task {
        let task = Task::create(draft, Utc::now());
        tracing::debug!(id = %task.id, "created task");
        let created = task.clone();
        self.tx.send_modify(move |s| s.tasks.push(task));
        created
    }

    /// Merges a partial update into the matching cached task, refreshing
    /// its `updated_at`, and keeps a matching current-task slot in sync.
    ///
    /// Returns `false` (no-op) when the id is absent.
    pub fn update_task(&self, id: &EntityId, patch: TaskPatch) -> bool {
        let now = Utc::now();
        let mut applied = false;
        self.tx.send_modify(|s| {
            if let Some(task) = s.tasks.iter_mut().find(|t| &t.id == id) {
                patch.apply(task, now);
                applied = true;
            }
            if let Some(current) = s.current_task.as_mut() {
                if &current.id == id {
                    patch.apply(current, now);
                    applied = true;
                }
            }
        });
        applied
    }

    /// Sends the targeted status-change request, then applies the new
    /// status to the cache.
    ///
    /// On success only `status` and `updated_at` change. On rejection the
    /// error propagates and the cache is left untouched.
    pub async fn update_task_status(&self, id: &EntityId, status: TaskStatus) -> Result<()> {
        let token = self.bearer()?;
        self.api.set_task_status(&token, id, status).await?;
        let now = Utc::now();
        self.tx.send_modify(|s| {
            if let Some(task) = s.tasks.iter_mut().find(|t| &t.id == id) {
                task.status = status;
                task.updated_at = now;
            }
            if let Some(current) = s.current_task.as_mut() {
                if &current.id == id {
                    current.status = status;
                    current.updated_at = now;
                }
            }
        });
        Ok(())
    }

    /// Removes a task from the cache, clearing a matching current-task
    /// slot. Idempotent: an absent id is a no-op.
    pub fn delete_task(&self, id: &EntityId) -> bool {
        let mut removed = false;
        self.tx.send_modify(|s| {
            let before = s.tasks.len();
            s.tasks.retain(|t| &t.id != id);
            removed = s.tasks.len() != before;
            if s.current_task.as_ref().is_some_and(|t| &t.id == id) {
                s.current_task = None;
            }
        });
        if removed {
            tracing::debug!(%id, "deleted task");
        }
        removed
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.tx.borrow();
        f.debug_struct("TaskStore")
            .field("tasks", &state.tasks.len())
            .field("is_loading", &state.is_loading)
            .finish()
    }
}
