//! Authenticated-session state.

use super::user::User;
use serde::{Deserialize, Serialize};

/// The authenticated-identity state of the client.
///
/// Invariant: `is_authenticated` holds exactly when both `user` and `token`
/// are present. The constructors maintain this; mutate sessions only by
/// replacing them with a freshly constructed value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Current user identity, absent when logged out.
    pub user: Option<User>,
    /// Bearer credential, absent when logged out.
    pub token: Option<String>,
    /// Whether the session is authenticated.
    pub is_authenticated: bool,
}

impl Session {
    /// An empty, unauthenticated session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An authenticated session for `user` holding `token`.
    pub fn authenticated<T: Into<String>>(user: User, token: T) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
            is_authenticated: true,
        }
    }

    /// Returns a copy of this session with the token replaced in place.
    ///
    /// Used by token refresh: the user identity is unchanged.
    pub fn with_token<T: Into<String>>(&self, token: T) -> Self {
        Self {
            user: self.user.clone(),
            token: Some(token.into()),
            is_authenticated: self.user.is_some(),
        }
    }

    /// The bearer token, if present.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The current user, if present.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}
