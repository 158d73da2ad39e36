//! Common test utilities for integration tests.
//!
//! Tests run against the in-memory record store, so no external services
//! are needed. Requests go through the full router via `oneshot`.

// Helper utilities here are shared across test binaries; not every binary
// uses every helper.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use ballotbox_api::app::create_app;
use ballotbox_api::config::Config;
use domain::catalog::{Catalog, CatalogCategory};
use persistence::memory::MemoryStore;

/// Base URL used in test config; admin links are asserted against it.
pub const TEST_BASE_URL: &str = "http://test.local";

/// Builds a config without touching the file system.
pub fn test_config() -> Config {
    Config {
        server: ballotbox_api::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
            app_base_url: TEST_BASE_URL.to_string(),
        },
        database: ballotbox_api::config::DatabaseConfig {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: ballotbox_api::config::LoggingConfig {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        },
        security: ballotbox_api::config::SecurityConfig {
            cors_origins: vec![],
        },
        limits: ballotbox_api::config::LimitsConfig {
            max_group_members: 100,
        },
    }
}

/// Small two-category catalog for tests.
pub fn test_catalog() -> Catalog {
    Catalog::new(
        "test-1",
        vec![
            CatalogCategory {
                key: "best_film".into(),
                name: "Best Film".into(),
                sort_order: Some(1),
                nominees: vec!["Film A".into(), "Film B".into(), "Film C".into()],
            },
            CatalogCategory {
                key: "best_score".into(),
                name: "Best Score".into(),
                sort_order: Some(2),
                nominees: vec!["Score A".into(), "Score B".into(), "Score C".into()],
            },
        ],
    )
}

/// App wired to a fresh in-memory store.
pub fn create_test_app() -> Router {
    create_app(
        test_config(),
        Arc::new(MemoryStore::new()),
        test_catalog(),
    )
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A created group with its host credentials extracted from the admin link.
pub struct TestGroup {
    pub code: String,
    pub host_key: String,
}

/// Creates a group and parses the host key out of the admin link.
pub async fn create_group(app: &Router, title: &str, max_members: u32) -> TestGroup {
    let response = send_json(
        app,
        Method::POST,
        "/api/v1/groups",
        serde_json::json!({
            "title": title,
            "host_name": "Host",
            "max_members": max_members,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let code = body["code"].as_str().unwrap().to_string();
    let admin_link = body["admin_link"].as_str().unwrap();
    let host_key = admin_link.split("?k=").nth(1).unwrap().to_string();

    TestGroup { code, host_key }
}

/// Issues `count` guest invites and returns their tokens.
pub async fn issue_guests(app: &Router, group: &TestGroup, count: u32) -> Vec<String> {
    let response = send_json(
        app,
        Method::POST,
        &format!(
            "/api/v1/groups/{}/invites?k={}",
            group.code, group.host_key
        ),
        serde_json::json!({ "count": count }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["token"].as_str().unwrap().to_string())
        .collect()
}

/// Applies a setup selection with the given catalog keys.
pub async fn apply_setup(app: &Router, group: &TestGroup, keys: &[&str]) -> Response<Body> {
    send_json(
        app,
        Method::POST,
        &format!("/api/v1/groups/{}/setup?k={}", group.code, group.host_key),
        serde_json::json!({ "category_keys": keys }),
    )
    .await
}

/// Fetches the ballot context for an invite token.
pub async fn ballot_context(app: &Router, group: &TestGroup, token: &str) -> serde_json::Value {
    let response = send_get(
        app,
        &format!("/api/v1/groups/{}/ballot?t={}", group.code, token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Builds a full ballot from a context, picking the nominee at `pick` in
/// every category.
pub fn full_ballot(context: &serde_json::Value, pick: usize) -> serde_json::Value {
    let votes: Vec<serde_json::Value> = context["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            serde_json::json!({
                "category_id": c["id"],
                "nominee_id": c["nominees"][pick]["id"],
            })
        })
        .collect();
    serde_json::json!({ "votes": votes })
}

/// Submits a ballot for an invite token.
pub async fn submit_ballot(
    app: &Router,
    group: &TestGroup,
    token: &str,
    ballot: serde_json::Value,
) -> Response<Body> {
    send_json(
        app,
        Method::POST,
        &format!("/api/v1/groups/{}/ballot?t={}", group.code, token),
        ballot,
    )
    .await
}

/// Casts a complete ballot (first nominee everywhere) and asserts success.
pub async fn vote(app: &Router, group: &TestGroup, token: &str) {
    let context = ballot_context(app, group, token).await;
    let ballot = full_ballot(&context, 0);
    let response = submit_ballot(app, group, token, ballot).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
