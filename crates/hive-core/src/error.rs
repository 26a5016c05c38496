//! Error types for the Hive client crates.

/// Errors that can occur while synchronizing store state with the remote API.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Authentication rejected (login, registration, or token refresh).
    #[error("authentication failed: {message}")]
    Auth {
        /// Human-readable rejection reason
        message: String,
        /// HTTP status returned by the server, if the request got that far
        status: Option<u16>,
    },

    /// A collection load was rejected by the server.
    #[error("failed to fetch {resource}: HTTP {status}")]
    Fetch {
        /// Which collection failed to load ("project", "task")
        resource: &'static str,
        /// Non-success HTTP status
        status: u16,
    },

    /// A targeted mutation was rejected by the server.
    #[error("failed to update {resource} '{id}': HTTP {status}")]
    Update {
        /// Which entity kind was being mutated
        resource: &'static str,
        /// Id of the entity the mutation targeted
        id: String,
        /// Non-success HTTP status
        status: u16,
    },

    /// Transport-level HTTP failure (connection refused, timeout, TLS).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (session file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session storage backend error
    #[error("storage error: {message}")]
    Storage {
        /// What went wrong in the backend
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for Hive client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is retryable.
    ///
    /// Transport failures and server-side (5xx) rejections are transient;
    /// authentication rejections and client-side (4xx) statuses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) => true,
            Error::Io(_) => true,
            Error::Fetch { status, .. } | Error::Update { status, .. } => *status >= 500,
            Error::Auth { .. } => false,
            Error::Serialization(_) => false,
            Error::Storage { .. } => false,
            Error::Config { .. } => false,
        }
    }

    /// Returns `true` if the error means the current credential is no good.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }

    /// Creates a new authentication error with a message.
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Error::Auth {
            message: message.into(),
            status: None,
        }
    }

    /// Creates a new authentication error carrying the server's HTTP status.
    pub fn auth_status<S: Into<String>>(message: S, status: u16) -> Self {
        Error::Auth {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Creates a new fetch error for a collection resource.
    pub fn fetch(resource: &'static str, status: u16) -> Self {
        Error::Fetch { resource, status }
    }

    /// Creates a new update error for a targeted mutation.
    pub fn update<I: Into<String>>(resource: &'static str, id: I, status: u16) -> Self {
        Error::Update {
            resource,
            id: id.into(),
            status,
        }
    }

    /// Creates a new storage error.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Error::Storage {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
