//! # hive-store
//!
//! Client-side resource stores for the Hive project-management service.
//!
//! Each store is an in-memory cache of one resource kind plus the
//! operations that synchronize it with the remote API:
//! - [`SessionStore`]: current user identity and bearer credential,
//!   persisted across restarts through a [`SessionStorage`] backend
//! - [`ProjectStore`]: the project collection and a current-project slot
//! - [`TaskStore`]: the task collection, with the targeted kanban
//!   status-transition operation
//!
//! Stores are explicit service objects: every dependency (API client,
//! storage backend, session handle) is injected through the constructor, so
//! tests can substitute any of them. State is broadcast over
//! `tokio::sync::watch`; consumers read snapshots via `state()` or react to
//! changes via `subscribe()`.
//!
//! Store methods never render UI. Errors propagate to the caller, which is
//! responsible for user-visible notification.

pub mod project;
pub mod session;
pub mod storage;
pub mod task;

pub use project::{ProjectState, ProjectStore};
pub use session::SessionStore;
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use task::{TaskState, TaskStore};

pub use hive_core::{Error, Result};
