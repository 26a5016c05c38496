//! User identity records.

use super::ids::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds within their organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Administers projects across the organization.
    ProjectAdmin,
    /// Leads one or more projects.
    ProjectLeader,
    /// Regular project member. Default role for new registrations.
    #[default]
    TeamMember,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectAdmin => write!(f, "PROJECT_ADMIN"),
            Self::ProjectLeader => write!(f, "PROJECT_LEADER"),
            Self::TeamMember => write!(f, "TEAM_MEMBER"),
        }
    }
}

/// An identity record, owned by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned user id.
    pub id: EntityId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email address.
    pub email: String,
    /// Role within the organization. Servers that omit this field get the
    /// registration default.
    #[serde(default)]
    pub role: UserRole,
    /// Organization the user belongs to.
    pub organization: String,
}

impl User {
    /// Full display name ("First Last").
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
