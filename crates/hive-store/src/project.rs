//! Project store: cached project collection plus a current-project slot.

use chrono::Utc;
use hive_client::ApiClient;
use hive_core::{EntityId, NewProject, Project, ProjectPatch, Result, Session};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Snapshot of the project store's state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectState {
    /// Cached project collection, at most one entry per id.
    pub projects: Vec<Project>,
    /// The current-project slot, filled by `fetch_project`.
    pub current_project: Option<Project>,
    /// True while a fetch is in flight.
    pub is_loading: bool,
}

/// Caches the project collection fetched from the remote API and applies
/// optimistic local mutations.
///
/// Creates, updates, and deletes are optimistic: they mutate the cache
/// without a server round-trip and without reconciliation (the next full
/// fetch replaces the cache with server truth). Fetches are fail-soft: a
/// failed fetch leaves the previous cache intact.
pub struct ProjectStore {
    api: ApiClient,
    session: watch::Receiver<Session>,
    tx: watch::Sender<ProjectState>,
    // Fetch generation: completions observing a newer generation discard
    // their response. The newest call owns the loading flag.
    fetch_generation: AtomicU64,
}

impl ProjectStore {
    /// Creates a store reading its bearer credential from `session`.
    pub fn new(api: ApiClient, session: watch::Receiver<Session>) -> Self {
        let (tx, _rx) = watch::channel(ProjectState::default());
        Self {
            api,
            session,
            tx,
            fetch_generation: AtomicU64::new(0),
        }
    }

    /// A snapshot of the store state.
    pub fn state(&self) -> ProjectState {
        self.tx.borrow().clone()
    }

    /// A snapshot of the cached collection.
    pub fn projects(&self) -> Vec<Project> {
        self.tx.borrow().projects.clone()
    }

    /// A snapshot of the current-project slot.
    pub fn current_project(&self) -> Option<Project> {
        self.tx.borrow().current_project.clone()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ProjectState> {
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
    pub async fn fetch_projects(&self) -> Result<()> {
        let token = self.bearer()?;
        let generation = self.begin_fetch();
        let result = self.api.list_projects(&token).await;
        if self.is_superseded(generation) {
            tracing::debug!("discarding superseded project fetch");
            return Ok(());
        }
        match result {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "fetched projects");
                self.tx.send_modify(|s| {
                    s.projects = projects;
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

    /// Loads a single project into the current-project slot.
    ///
    /// An absent id is a valid result, not an error: the slot is emptied.
    pub async fn fetch_project(&self, id: &EntityId) -> Result<()> {
        let token = self.bearer()?;
        let generation = self.begin_fetch();
        let result = self.api.list_projects(&token).await;
        if self.is_superseded(generation) {
            tracing::debug!("discarding superseded project fetch");
            return Ok(());
        }
        match result {
            Ok(projects) => {
                let current = projects.into_iter().find(|p| &p.id == id);
                self.tx.send_modify(|s| {
                    s.current_project = current;
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

    /// Optimistically creates a project in the local cache.
    ///
    /// Assigns a fresh monotonic id and sets both timestamps to now. No
    /// server round-trip, no reconciliation.
    pub fn create_project(&self, draft: NewProject) -> Project {
        let project = Project::create(draft, Utc::now());
        tracing::debug!(id = %project.id, "created project");
        let created = project.clone();
        self.tx.send_modify(move |s| s.projects.push(project));
        created
    }

    /// Merges a partial update into the matching cached project, refreshing
    /// its `updated_at`, and keeps a matching current-project slot in sync.
    ///
    /// Returns `false` (no-op) when the id is absent from both the cache
    /// and the slot.
    pub fn update_project(&self, id: &EntityId, patch: ProjectPatch) -> bool {
        let now = Utc::now();
        let mut applied = false;
        self.tx.send_modify(|s| {
            if let Some(project) = s.projects.iter_mut().find(|p| &p.id == id) {
                patch.apply(project, now);
                applied = true;
            }
            if let Some(current) = s.current_project.as_mut() {
                if &current.id == id {
                    patch.apply(current, now);
                    applied = true;
                }
            }
        });
        applied
    }

    /// Removes a project from the cache, clearing a matching
    /// current-project slot. Idempotent: an absent id is a no-op.
    pub fn delete_project(&self, id: &EntityId) -> bool {
        let mut removed = false;
        self.tx.send_modify(|s| {
            let before = s.projects.len();
            s.projects.retain(|p| &p.id != id);
            removed = s.projects.len() != before;
            if s.current_project.as_ref().is_some_and(|p| &p.id == id) {
                s.current_project = None;
            }
        });
        if removed {
            tracing::debug!(%id, "deleted project");
        }
        removed
    }
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.tx.borrow();
        f.debug_struct("ProjectStore")
            .field("projects", &state.projects.len())
            .field("is_loading", &state.is_loading)
            .finish()
    }
}
