//! Auth endpoint tests: login, registration, token refresh.

use crate::common::{user_body, TestHarness};
use hive_client::RegisterRequest;
use hive_core::{Error, UserRole};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_success_returns_token_and_user() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({
            "email": "ada@acme.example",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": user_body("1", "ada@acme.example")
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let auth = harness
        .client
        .login("ada@acme.example", "hunter2")
        .await
        .unwrap();
    assert_eq!(auth.token, "jwt-abc");
    assert_eq!(auth.user.email, "ada@acme.example");
    assert_eq!(auth.user.role, UserRole::ProjectLeader);
}

#[tokio::test]
async fn test_login_rejection_maps_to_auth_error() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&harness.server)
        .await;

    let err = harness
        .client
        .login("ada@acme.example", "wrong")
        .await
        .unwrap_err();
    let Error::Auth { status, .. } = err else {
        panic!("expected Auth error, got {err:?}");
    };
    assert_eq!(status, Some(401));
}

#[tokio::test]
async fn test_register_success() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "jwt-new",
            "user": {
                "id": "7",
                "firstName": "Grace",
                "lastName": "Hopper",
                "email": "grace@acme.example",
                "organization": "Acme Corp"
            }
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let request = RegisterRequest {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@acme.example".to_string(),
        password: "hunter2".to_string(),
        organization: "Acme Corp".to_string(),
    };
    let auth = harness.client.register(&request).await.unwrap();
    assert_eq!(auth.token, "jwt-new");
    // Role omitted by the server defaults to TEAM_MEMBER
    assert_eq!(auth.user.role, UserRole::TeamMember);
}

#[tokio::test]
async fn test_register_rejection_maps_to_auth_error() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&harness.server)
        .await;

    let request = RegisterRequest {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "taken@acme.example".to_string(),
        password: "hunter2".to_string(),
        organization: "Acme Corp".to_string(),
    };
    let err = harness.client.register(&request).await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_refresh_sends_bearer_token() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(header("authorization", "Bearer old-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "renewed-token"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let renewed = harness.client.refresh("old-token").await.unwrap();
    assert_eq!(renewed.token, "renewed-token");
}

#[tokio::test]
async fn test_refresh_rejection_maps_to_auth_error() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&harness.server)
        .await;

    let err = harness.client.refresh("expired").await.unwrap_err();
    assert!(err.is_auth());
    assert!(!err.is_retryable());
}
