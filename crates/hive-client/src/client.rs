//! Hive API client.
//!
//! One [`ApiClient`] instance holds a pooled [`reqwest::Client`] and the
//! base-URL configuration. All methods are cheap to call concurrently; the
//! client itself carries no session state; callers pass the bearer token
//! for authenticated endpoints.

use crate::config::ClientConfig;
use hive_core::{EntityId, Error, Project, Result, Task, TaskStatus, User};
use serde::{Deserialize, Serialize};

/// Successful login/registration payload: a bearer token plus the user it
/// identifies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer credential for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Successful token-refresh payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// The renewed bearer credential.
    pub token: String,
}

/// New-account fields sent to the registration endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email address.
    pub email: String,
    /// Plaintext password (sent over TLS in production).
    pub password: String,
    /// Organization the account belongs to.
    pub organization: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusRequest {
    status: TaskStatus,
}

/// Async client for the Hive REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Authenticates with email and password.
    ///
    /// Non-success statuses map to [`Error::Auth`] carrying the HTTP status.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        tracing::debug!(%email, "logging in");
        let response = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::auth_status("login rejected", status.as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Creates a new account and authenticates as it.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        tracing::debug!(email = %request.email, "registering account");
        let response = self
            .http
            .post(self.url("/api/v1/auth/register"))
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::auth_status("registration rejected", status.as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Renews a bearer token, authenticating with the current one.
    pub async fn refresh(&self, token: &str) -> Result<TokenResponse> {
        let response = self
            .http
            .post(self.url("/api/v1/auth/refresh"))
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::auth_status("token refresh rejected", status.as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Fetches the full project collection.
    pub async fn list_projects(&self, token: &str) -> Result<Vec<Project>> {
        let response = self
            .http
            .get(self.url("/api/v1/project"))
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch("project", status.as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Fetches the full task collection.
    pub async fn list_tasks(&self, token: &str) -> Result<Vec<Task>> {
        let response = self
            .http
            .get(self.url("/api/v1/task"))
            .bearer_auth(token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch("task", status.as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Sets a task's status through the targeted status endpoint.
    ///
    /// This is the lightweight transition used by kanban drag/drop; the
    /// server accepts any status from any prior status.
    pub async fn set_task_status(
        &self,
        token: &str,
        id: &EntityId,
        status: TaskStatus,
    ) -> Result<()> {
        tracing::debug!(task = %id, %status, "setting task status");
        let response = self
            .http
            .put(self.url(&format!("/api/v1/task/{id}/status")))
            .bearer_auth(token)
            .json(&StatusRequest { status })
            .send()
            .await?;
        let http_status = response.status();
        if !http_status.is_success() {
            return Err(Error::update("task", id.as_str(), http_status.as_u16()));
        }
        Ok(())
    }
}
