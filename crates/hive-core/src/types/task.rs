//! Task records, drafts, and partial updates.

use super::ids::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kanban status of a task.
///
/// The conventional flow is TODO → IN_PROGRESS → IN_REVIEW → COMPLETED,
/// but that ordering is a UI convention only: the store allows any
/// transition between any pair of statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Awaiting review.
    InReview,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// All statuses in conventional kanban column order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Completed,
    ];
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Todo => write!(f, "TODO"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::InReview => write!(f, "IN_REVIEW"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "IN_REVIEW" => Ok(Self::InReview),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(crate::Error::config(format!("unknown task status '{other}'"))),
        }
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// A task record, uniquely keyed by `id` within the task store cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned (or locally generated) id.
    pub id: EntityId,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Kanban status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Id of the assigned user. Unvalidated foreign reference.
    pub assignee_id: EntityId,
    /// Id of the owning project. Unvalidated foreign reference.
    pub project_id: EntityId,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materializes a draft into a full record with a fresh monotonic id and
    /// both timestamps set to `now`.
    pub fn create(draft: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id: EntityId::generate(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            assignee_id: draft.assignee_id,
            project_id: draft.project_id,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields supplied when optimistically creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Initial kanban status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Id of the assigned user.
    pub assignee_id: EntityId,
    /// Id of the owning project.
    pub project_id: EntityId,
    /// Due date.
    pub due_date: DateTime<Utc>,
}

/// A partial update to a task; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title, if changing.
    pub title: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New status, if changing.
    pub status: Option<TaskStatus>,
    /// New priority, if changing.
    pub priority: Option<TaskPriority>,
    /// New assignee, if changing.
    pub assignee_id: Option<EntityId>,
    /// New owning project, if changing.
    pub project_id: Option<EntityId>,
    /// New due date, if changing.
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Merges the set fields into `task` and refreshes `updated_at`.
    ///
    /// Takes `&self` so one patch can be applied to both a cache entry and
    /// a current-entity slot.
    pub fn apply(&self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(assignee_id) = &self.assignee_id {
            task.assignee_id = assignee_id.clone();
        }
        if let Some(project_id) = &self.project_id {
            task.project_id = project_id.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        task.updated_at = now;
    }

    /// Convenience patch that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
