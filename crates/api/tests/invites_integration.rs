//! Integration tests for invite management.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, create_group, create_test_app, issue_guests, send_get, send_json,
};
use serde_json::json;

#[tokio::test]
async fn test_issue_invites_creates_guests_with_tokens() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;

    let response = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
        json!({ "count": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let invites = body["data"].as_array().unwrap();
    assert_eq!(invites.len(), 3);
    for invite in invites {
        assert_eq!(invite["role"], "guest");
        assert_eq!(invite["display_name"], "Guest");
        let token = invite["token"].as_str().unwrap();
        assert_eq!(token.len(), 64);
    }
}

#[tokio::test]
async fn test_issue_invites_requires_host_key() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;

    // No key
    let response = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/groups/{}/invites", group.code),
        json!({ "count": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong key
    let response = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/groups/{}/invites?k=deadbeef", group.code),
        json!({ "count": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_guest_token_is_not_a_host_key() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;
    let guests = issue_guests(&app, &group, 1).await;

    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, guests[0]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_capacity_rejects_whole_batch() {
    let app = create_test_app();
    // Host occupies one of four seats.
    let group = create_group(&app, "Awards", 4).await;

    let response = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
        json!({ "count": 4 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "capacity_exceeded");

    // Nothing was created.
    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // A batch that fits still works afterwards.
    let response = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
        json!({ "count": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_absurd_count_rejected_cheaply() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 4).await;

    // Far beyond any capacity; must be turned away without building the
    // batch. Would hang or die on allocation if tokens were generated first.
    let response = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
        json!({ "count": u32::MAX }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "capacity_exceeded");

    // Only the host invite exists.
    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_zero_count_rejected() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;

    let response = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
        json!({ "count": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_invites_keeps_creation_order() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 10).await;
    issue_guests(&app, &group, 2).await;
    issue_guests(&app, &group, 1).await;

    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
    )
    .await;
    let body = body_json(response).await;
    let invites = body["data"].as_array().unwrap();
    assert_eq!(invites.len(), 4);
    assert_eq!(invites[0]["role"], "host");

    // Stable across repeated polls.
    let ids: Vec<String> = invites
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();
    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
    )
    .await;
    let body = body_json(response).await;
    let again: Vec<String> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, again);
}

#[tokio::test]
async fn test_rename_invite() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;
    issue_guests(&app, &group, 1).await;

    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
    )
    .await;
    let body = body_json(response).await;
    let guest_id = body["data"][1]["id"].as_str().unwrap().to_string();

    let response = send_json(
        &app,
        Method::PATCH,
        &format!(
            "/api/v1/groups/{}/invites/{}?k={}",
            group.code, guest_id, group.host_key
        ),
        json!({ "display_name": "  Martina  " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["display_name"], "Martina");
}

#[tokio::test]
async fn test_rename_invite_blank_name_rejected() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;
    issue_guests(&app, &group, 1).await;

    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
    )
    .await;
    let body = body_json(response).await;
    let guest_id = body["data"][1]["id"].as_str().unwrap().to_string();

    let response = send_json(
        &app,
        Method::PATCH,
        &format!(
            "/api/v1/groups/{}/invites/{}?k={}",
            group.code, guest_id, group.host_key
        ),
        json!({ "display_name": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_unknown_invite_is_not_found() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;

    let response = send_json(
        &app,
        Method::PATCH,
        &format!(
            "/api/v1/groups/{}/invites/{}?k={}",
            group.code,
            uuid::Uuid::new_v4(),
            group.host_key
        ),
        json!({ "display_name": "Martina" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_invite_from_other_group_is_forbidden() {
    let app = create_test_app();
    let group_a = create_group(&app, "Awards A", 5).await;
    let group_b = create_group(&app, "Awards B", 5).await;
    issue_guests(&app, &group_b, 1).await;

    let response = send_get(
        &app,
        &format!(
            "/api/v1/groups/{}/invites?k={}",
            group_b.code, group_b.host_key
        ),
    )
    .await;
    let body = body_json(response).await;
    let foreign_id = body["data"][1]["id"].as_str().unwrap().to_string();

    let response = send_json(
        &app,
        Method::PATCH,
        &format!(
            "/api/v1/groups/{}/invites/{}?k={}",
            group_a.code, foreign_id, group_a.host_key
        ),
        json!({ "display_name": "Martina" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"], "forbidden");
}
