//! Entity identifier type shared by all domain records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a domain entity (user, project, task).
///
/// Ids are opaque strings assigned by the server. Optimistically created
/// entities get a locally generated server-assigned-style id: the current
/// millisecond timestamp plus a process-wide tiebreak, which keeps ids
/// monotonic and unique within a process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

static GENERATED: AtomicU64 = AtomicU64::new(0);

impl EntityId {
    /// Creates an entity id from an existing string (server-assigned).
    ///
    /// # Examples
    ///
    /// ```
    /// use hive_core::EntityId;
    ///
    /// let id = EntityId::new("42");
    /// assert_eq!(id.as_str(), "42");
    /// ```
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Generates a fresh monotonic-unique id for an optimistically created
    /// entity.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let seq = GENERATED.fetch_add(1, Ordering::Relaxed);
        Self(format!("{millis}-{seq}"))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
