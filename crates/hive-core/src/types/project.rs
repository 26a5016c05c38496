//! Project records, drafts, and partial updates.

use super::ids::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Work in progress.
    Active,
    /// Not yet started.
    Planning,
    /// Paused.
    OnHold,
    /// Finished.
    Completed,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Planning => write!(f, "PLANNING"),
            Self::OnHold => write!(f, "ON_HOLD"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "ACTIVE" => Ok(Self::Active),
            "PLANNING" => Ok(Self::Planning),
            "ON_HOLD" => Ok(Self::OnHold),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(crate::Error::config(format!(
                "unknown project status '{other}'"
            ))),
        }
    }
}

/// A project record, uniquely keyed by `id` within the project store cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Server-assigned (or locally generated) id.
    pub id: EntityId,
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Number of members on the project.
    pub member_count: u32,
    /// Completion percentage, clamped to 0..=100.
    pub progress: u8,
    /// Ordered tag list.
    pub tags: Vec<String>,
    /// Id of the leading user. Unvalidated foreign reference.
    pub leader_id: EntityId,
}

impl Project {
    /// Materializes a draft into a full record with a fresh monotonic id and
    /// both timestamps set to `now`.
    pub fn create(draft: NewProject, now: DateTime<Utc>) -> Self {
        Self {
            id: EntityId::generate(),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            created_at: now,
            updated_at: now,
            member_count: draft.member_count,
            progress: draft.progress.min(100),
            tags: draft.tags,
            leader_id: draft.leader_id,
        }
    }
}

/// Fields supplied when optimistically creating a project.
///
/// Everything except the id and timestamps, which are assigned at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Initial lifecycle status.
    pub status: ProjectStatus,
    /// Number of members on the project.
    pub member_count: u32,
    /// Initial completion percentage.
    pub progress: u8,
    /// Ordered tag list.
    pub tags: Vec<String>,
    /// Id of the leading user.
    pub leader_id: EntityId,
}

/// A partial update to a project; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    /// New name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New status, if changing.
    pub status: Option<ProjectStatus>,
    /// New member count, if changing.
    pub member_count: Option<u32>,
    /// New progress, if changing.
    pub progress: Option<u8>,
    /// Replacement tag list, if changing.
    pub tags: Option<Vec<String>>,
    /// New leader, if changing.
    pub leader_id: Option<EntityId>,
}

impl ProjectPatch {
    /// Merges the set fields into `project` and refreshes `updated_at`.
    ///
    /// Takes `&self` so one patch can be applied to both a cache entry and
    /// a current-entity slot.
    pub fn apply(&self, project: &mut Project, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(member_count) = self.member_count {
            project.member_count = member_count;
        }
        if let Some(progress) = self.progress {
            project.progress = progress.min(100);
        }
        if let Some(tags) = &self.tags {
            project.tags = tags.clone();
        }
        if let Some(leader_id) = &self.leader_id {
            project.leader_id = leader_id.clone();
        }
        project.updated_at = now;
    }

    /// Convenience patch that only changes the status.
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
