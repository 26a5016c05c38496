//! Domain types for the Hive client.

pub mod ids;
pub mod project;
pub mod session;
pub mod task;
pub mod user;

pub use ids::EntityId;
pub use project::{NewProject, Project, ProjectPatch, ProjectStatus};
pub use session::Session;
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use user::{User, UserRole};
