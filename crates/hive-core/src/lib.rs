//! Shared domain types, identifiers, and errors for the Hive client.
//!
//! This crate provides the foundational types used across all Hive client
//! crates. It has no internal Hive dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`types`]: Domain records (users, sessions, projects, tasks) and ids

pub mod error;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use types::ids::EntityId;
pub use types::project::{NewProject, Project, ProjectPatch, ProjectStatus};
pub use types::session::Session;
pub use types::task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use types::user::{User, UserRole};
