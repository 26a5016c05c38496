//! Session store: login, registration, token refresh, logout.

use crate::storage::SessionStorage;
use hive_client::{ApiClient, RegisterRequest};
use hive_core::{Result, Session};
use tokio::sync::watch;

/// Holds the current user identity and bearer credential, and performs the
/// auth operations against the remote API.
///
/// Every successful mutating operation persists the full session through
/// the injected [`SessionStorage`]; the persisted record is rehydrated by
/// [`SessionStore::open`]. State changes are broadcast to subscribers via a
/// watch channel; entity stores hold a receiver and read the bearer token
/// from it.
pub struct SessionStore {
    api: ApiClient,
    storage: Box<dyn SessionStorage>,
    tx: watch::Sender<Session>,
}

impl SessionStore {
    /// Opens the store, rehydrating any session persisted by a previous
    /// process.
    pub async fn open(api: ApiClient, storage: Box<dyn SessionStorage>) -> Result<Self> {
        let initial = storage.load().await?.unwrap_or_default();
        if initial.is_authenticated {
            tracing::debug!(
                user = initial.user().map(|u| u.email.as_str()).unwrap_or(""),
                "restored persisted session"
            );
        }
        let (tx, _rx) = watch::channel(initial);
        Ok(Self { api, storage, tx })
    }

    /// A snapshot of the current session.
    pub fn session(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Whether the session currently holds an authenticated identity.
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Authenticates with email and password.
    ///
    /// On rejection the error propagates and the prior session state is
    /// left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let auth = self.api.login(email, password).await?;
        tracing::info!(user = %auth.user.email, "logged in");
        self.commit(Session::authenticated(auth.user, auth.token))
            .await
    }

    /// Creates a new account and establishes a session for it.
    ///
    /// The server assigns the default role (team member) when none is sent.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let auth = self.api.register(request).await?;
        tracing::info!(user = %auth.user.email, "registered account");
        self.commit(Session::authenticated(auth.user, auth.token))
            .await
    }

    /// Clears the session unconditionally. Has no failure mode: persistence
    /// errors while clearing are logged and swallowed.
    pub async fn logout(&self) {
        self.tx.send_replace(Session::empty());
        if let Err(e) = self.storage.save(&Session::empty()).await {
            tracing::warn!(error = %e, "failed to persist cleared session");
        }
        tracing::info!("logged out");
    }

    /// Renews the bearer token using the current one.
    ///
    /// No-op without a network call when no token is present. On rejection
    /// the credential is treated as unrecoverable: the session cascades to
    /// [`logout`](Self::logout) and the error is swallowed with a warning.
    pub async fn refresh_token(&self) -> Result<()> {
        let current = self.session();
        let Some(token) = current.token() else {
            return Ok(());
        };
        match self.api.refresh(token).await {
            Ok(renewed) => {
                tracing::debug!("token refreshed");
                self.commit(current.with_token(renewed.token)).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed, clearing session");
                self.logout().await;
                Ok(())
            }
        }
    }

    async fn commit(&self, session: Session) -> Result<()> {
        self.tx.send_replace(session.clone());
        self.storage.save(&session).await
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("is_authenticated", &self.is_authenticated())
            .finish()
    }
}
