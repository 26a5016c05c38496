//! Project store tests: fetching, optimistic mutation, fail-soft behavior.

use crate::common::{project_draft, project_json, TestHarness};
use hive_core::{EntityId, Error, ProjectPatch, ProjectStatus};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_fetch_projects_replaces_cache() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            project_json("1", "Website Redesign", "ACTIVE"),
            project_json("2", "Mobile App", "PLANNING"),
        ])))
        .mount(&harness.server)
        .await;

    // A stale optimistic entry is replaced wholesale by server truth
    store.create_project(project_draft("Stale"));

    store.fetch_projects().await.unwrap();

    let state = store.state();
    assert_eq!(state.projects.len(), 2);
    assert_eq!(state.projects[0].name, "Website Redesign");
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_fetch_projects_failure_is_fail_soft() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;

    let created = store.create_project(project_draft("Kept"));
    let err = store.fetch_projects().await.unwrap_err();

    let Error::Fetch { resource, status } = err else {
        panic!("expected Fetch error, got {err:?}");
    };
    assert_eq!(resource, "project");
    assert_eq!(status, 500);

    // Prior cache intact, loading flag reset
    let state = store.state();
    assert_eq!(state.projects, vec![created]);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_fetch_without_token_fails_before_the_network() {
    let harness = TestHarness::start().await;
    let store = harness.project_store();
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&harness.server)
        .await;

    let err = store.fetch_projects().await.unwrap_err();
    assert!(err.is_auth());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_fetch_project_fills_current_slot() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            project_json("1", "Website Redesign", "ACTIVE"),
            project_json("2", "Mobile App", "PLANNING"),
        ])))
        .mount(&harness.server)
        .await;

    store.fetch_project(&EntityId::new("2")).await.unwrap();
    assert_eq!(store.current_project().unwrap().name, "Mobile App");
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_fetch_project_absent_id_empties_slot_without_error() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!([project_json("1", "Website Redesign", "ACTIVE")])))
        .mount(&harness.server)
        .await;

    store.fetch_project(&EntityId::new("1")).await.unwrap();
    assert!(store.current_project().is_some());

    store.fetch_project(&EntityId::new("missing")).await.unwrap();
    assert!(store.current_project().is_none());
}

#[tokio::test]
async fn test_create_project_assigns_unique_ids() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();

    let a = store.create_project(project_draft("A"));
    let b = store.create_project(project_draft("B"));
    assert_ne!(a.id, b.id);

    let projects = store.projects();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects.iter().filter(|p| p.id == a.id).count(), 1);
    assert_eq!(projects.iter().filter(|p| p.id == b.id).count(), 1);
}

#[tokio::test]
async fn test_update_project_changes_only_target_fields() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    let a = store.create_project(project_draft("A"));
    let b = store.create_project(project_draft("B"));

    tokio::time::sleep(Duration::from_millis(5)).await;
    let applied = store.update_project(&a.id, ProjectPatch::status(ProjectStatus::Completed));
    assert!(applied);

    let projects = store.projects();
    let updated = projects.iter().find(|p| p.id == a.id).unwrap();
    assert_eq!(updated.status, ProjectStatus::Completed);
    assert!(updated.updated_at > a.updated_at);
    // Everything else on the entity unchanged
    assert_eq!(updated.name, a.name);
    assert_eq!(updated.created_at, a.created_at);
    // The other entity untouched entirely
    assert_eq!(projects.iter().find(|p| p.id == b.id).unwrap(), &b);
}

#[tokio::test]
async fn test_update_project_refreshes_matching_current_slot() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!([project_json("1", "Website Redesign", "ACTIVE")])))
        .mount(&harness.server)
        .await;
    store.fetch_projects().await.unwrap();
    store.fetch_project(&EntityId::new("1")).await.unwrap();

    store.update_project(
        &EntityId::new("1"),
        ProjectPatch {
            name: Some("Renamed".to_string()),
            ..ProjectPatch::default()
        },
    );

    assert_eq!(store.current_project().unwrap().name, "Renamed");
    assert_eq!(store.projects()[0].name, "Renamed");
}

#[tokio::test]
async fn test_update_absent_project_is_a_noop() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    let a = store.create_project(project_draft("A"));

    let applied = store.update_project(
        &EntityId::new("missing"),
        ProjectPatch::status(ProjectStatus::OnHold),
    );
    assert!(!applied);
    assert_eq!(store.projects(), vec![a]);
}

#[tokio::test]
async fn test_delete_project_is_idempotent() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    let a = store.create_project(project_draft("A"));

    assert!(store.delete_project(&a.id));
    assert!(store.projects().is_empty());

    // Second delete: no-op, no error
    assert!(!store.delete_project(&a.id));
    assert!(store.projects().is_empty());
}

#[tokio::test]
async fn test_delete_project_clears_matching_current_slot() {
    let harness = TestHarness::start_authenticated().await;
    let store = harness.project_store();
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!([project_json("1", "Website Redesign", "ACTIVE")])))
        .mount(&harness.server)
        .await;
    store.fetch_projects().await.unwrap();
    store.fetch_project(&EntityId::new("1")).await.unwrap();
    assert!(store.current_project().is_some());

    store.delete_project(&EntityId::new("1"));
    assert!(store.current_project().is_none());
}

#[tokio::test]
async fn test_superseded_fetch_is_discarded() {
    let harness = TestHarness::start_authenticated().await;
    let store = Arc::new(harness.project_store());

    // First fetch gets a slow, stale response; second gets fresh data.
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([project_json("1", "Stale", "ON_HOLD")]))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/project"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!([project_json("2", "Fresh", "ACTIVE")])))
        .mount(&harness.server)
        .await;

    let slow = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.fetch_projects().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.fetch_projects().await.unwrap();
    slow.await.unwrap().unwrap();

    // The slow completion was discarded; the newer fetch's data stands.
    let state = store.state();
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.projects[0].name, "Fresh");
    assert!(!state.is_loading);
}
