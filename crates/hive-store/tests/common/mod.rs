//! Common test utilities for the Hive store integration tests.

use hive_client::{ApiClient, ClientConfig};
use hive_core::{
    EntityId, NewProject, NewTask, ProjectStatus, Session, TaskPriority, TaskStatus, User,
    UserRole,
};
use hive_store::{MemorySessionStorage, ProjectStore, SessionStore, TaskStore};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

/// Test harness: a wiremock server, an API client against it, and a session
/// store whose storage backend stays inspectable from the test.
pub struct TestHarness {
    /// The mock API server.
    pub server: MockServer,
    /// Client configured against the mock server.
    pub api: ApiClient,
    /// The session store under test.
    pub sessions: SessionStore,
    /// Handle on the storage backend injected into `sessions`.
    pub storage: Arc<MemorySessionStorage>,
}

impl TestHarness {
    /// Starts a harness with an empty session.
    pub async fn start() -> Self {
        Self::with_storage(Arc::new(MemorySessionStorage::new())).await
    }

    /// Starts a harness whose storage already holds an authenticated
    /// session, as if persisted by a previous process.
    pub async fn start_authenticated() -> Self {
        let storage = Arc::new(MemorySessionStorage::with_session(sample_session()));
        Self::with_storage(storage).await
    }

    async fn with_storage(storage: Arc<MemorySessionStorage>) -> Self {
        let server = MockServer::start().await;
        let api = ApiClient::new(ClientConfig::new(server.uri()))
            .expect("client config against mock server must be valid");
        let sessions = SessionStore::open(api.clone(), Box::new(Arc::clone(&storage)))
            .await
            .expect("opening a session store over memory storage cannot fail");
        Self {
            server,
            api,
            sessions,
            storage,
        }
    }

    /// A project store wired to this harness's session.
    pub fn project_store(&self) -> ProjectStore {
        ProjectStore::new(self.api.clone(), self.sessions.subscribe())
    }

    /// A task store wired to this harness's session.
    pub fn task_store(&self) -> TaskStore {
        TaskStore::new(self.api.clone(), self.sessions.subscribe())
    }
}

/// The user every authenticated test session belongs to.
pub fn sample_user() -> User {
    User {
        id: EntityId::new("1"),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@acme.example".to_string(),
        role: UserRole::ProjectLeader,
        organization: "Acme Corp".to_string(),
    }
}

/// An authenticated session holding `jwt-abc`.
pub fn sample_session() -> Session {
    Session::authenticated(sample_user(), "jwt-abc")
}

/// A user JSON body as the server would return it.
pub fn user_json() -> Value {
    json!({
        "id": "1",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@acme.example",
        "role": "PROJECT_LEADER",
        "organization": "Acme Corp"
    })
}

/// A project JSON body as the server would return it.
pub fn project_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "A project",
        "status": status,
        "createdAt": "2024-01-15T10:00:00Z",
        "updatedAt": "2024-01-20T14:30:00Z",
        "memberCount": 5,
        "progress": 65,
        "tags": ["Design", "Frontend"],
        "leaderId": "1"
    })
}

/// A task JSON body as the server would return it.
pub fn task_json(id: &str, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "A task",
        "status": status,
        "priority": "HIGH",
        "assigneeId": "1",
        "projectId": "1",
        "dueDate": "2024-02-01T00:00:00Z",
        "createdAt": "2024-01-15T10:00:00Z",
        "updatedAt": "2024-01-20T14:30:00Z"
    })
}

/// A project draft for optimistic creation.
pub fn project_draft(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: "A project".to_string(),
        status: ProjectStatus::Planning,
        member_count: 3,
        progress: 0,
        tags: vec!["Backend".to_string()],
        leader_id: EntityId::new("1"),
    }
}

/// A task draft for optimistic creation.
pub fn task_draft(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: "A task".to_string(),
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        assignee_id: EntityId::new("1"),
        project_id: EntityId::new("1"),
        due_date: chrono::Utc::now() + chrono::Duration::days(7),
    }
}
