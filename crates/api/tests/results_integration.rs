//! Integration tests for status, reveal, and results.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    apply_setup, ballot_context, body_json, create_group, create_test_app, full_ballot,
    issue_guests, send_get, send_json, submit_ballot, vote, TestGroup,
};
use serde_json::json;

async fn host_token(app: &axum::Router, group: &TestGroup) -> String {
    let response = send_get(
        app,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
    )
    .await;
    let body = body_json(response).await;
    body["data"][0]["token"].as_str().unwrap().to_string()
}

async fn get_status(app: &axum::Router, group: &TestGroup) -> serde_json::Value {
    let response = send_get(
        app,
        &format!("/api/v1/groups/{}/status?k={}", group.code, group.host_key),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn reveal(app: &axum::Router, group: &TestGroup) -> axum::response::Response {
    send_json(
        app,
        Method::POST,
        &format!("/api/v1/groups/{}/reveal?k={}", group.code, group.host_key),
        json!({}),
    )
    .await
}

#[tokio::test]
async fn test_status_counts_and_threshold() {
    let app = create_test_app();
    // Capacity 5, threshold 3.
    let group = create_group(&app, "Awards", 5).await;
    apply_setup(&app, &group, &["best_film"]).await;
    let guests = issue_guests(&app, &group, 3).await;

    let status = get_status(&app, &group).await;
    assert_eq!(status["group"]["max_members"], 5);
    assert_eq!(status["counts"]["total_invites"], 4);
    assert_eq!(status["counts"]["voted"], 0);
    assert_eq!(status["can_reveal"], false);

    vote(&app, &group, &guests[0]).await;
    vote(&app, &group, &guests[1]).await;
    let status = get_status(&app, &group).await;
    assert_eq!(status["counts"]["voted"], 2);
    assert_eq!(status["can_reveal"], false);

    // Third ballot reaches ceil(5/2) = 3.
    vote(&app, &group, &guests[2]).await;
    let status = get_status(&app, &group).await;
    assert_eq!(status["counts"]["voted"], 3);
    assert_eq!(status["can_reveal"], true);
}

#[tokio::test]
async fn test_reveal_before_threshold_conflicts() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 4).await;
    apply_setup(&app, &group, &["best_film"]).await;
    issue_guests(&app, &group, 2).await;

    let response = reveal(&app, &group).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"], "reveal_not_ready");
    // Message names the threshold and the current count.
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("0 of 2"), "unexpected message: {}", message);
}

#[tokio::test]
async fn test_reveal_is_idempotent() {
    let app = create_test_app();
    // Capacity 2, threshold 1.
    let group = create_group(&app, "Awards", 2).await;
    apply_setup(&app, &group, &["best_film"]).await;
    let token = host_token(&app, &group).await;
    vote(&app, &group, &token).await;

    let first = body_json(reveal(&app, &group).await).await;
    let second = body_json(reveal(&app, &group).await).await;
    assert_eq!(first["reveal_at"], second["reveal_at"]);

    let status = get_status(&app, &group).await;
    assert_eq!(status["group"]["reveal_at"], first["reveal_at"]);
    // Already revealed: the gate reports false.
    assert_eq!(status["can_reveal"], false);
}

#[tokio::test]
async fn test_results_require_reveal() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;
    apply_setup(&app, &group, &["best_film"]).await;

    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/results?k={}", group.code, group.host_key),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_revealed_yet");

    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/public-results", group.code),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_results_ranked_descending_with_zero_counts() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 6).await;
    apply_setup(&app, &group, &["best_film"]).await;
    let guests = issue_guests(&app, &group, 3).await;

    // Two votes for nominee 0, one for nominee 1, none for nominee 2.
    vote(&app, &group, &guests[0]).await;
    vote(&app, &group, &guests[1]).await;
    let context = ballot_context(&app, &group, &guests[2]).await;
    let ballot = full_ballot(&context, 1);
    let response = submit_ballot(&app, &group, &guests[2], ballot).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(reveal(&app, &group).await.status(), StatusCode::OK);

    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/results?k={}", group.code, group.host_key),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    let nominees = body["results"][0]["nominees"].as_array().unwrap();
    assert_eq!(nominees.len(), 3);
    let counts: Vec<u64> = nominees
        .iter()
        .map(|n| n["votes"].as_u64().unwrap())
        .collect();
    assert_eq!(counts, vec![2, 1, 0]);
    assert_eq!(nominees[0]["nominee_name"], "Film A");
    assert_eq!(nominees[1]["nominee_name"], "Film B");
    assert_eq!(nominees[2]["nominee_name"], "Film C");
}

#[tokio::test]
async fn test_public_results_list_voters_without_tokens() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 2).await;
    apply_setup(&app, &group, &["best_film"]).await;
    issue_guests(&app, &group, 1).await;
    let token = host_token(&app, &group).await;
    vote(&app, &group, &token).await;
    assert_eq!(reveal(&app, &group).await.status(), StatusCode::OK);

    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/public-results", group.code),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let voters = body["voters"].as_array().unwrap();
    assert_eq!(voters.len(), 2);
    assert_eq!(voters[0]["display_name"], "Host");
    assert_eq!(voters[0]["voted"], true);
    assert_eq!(voters[1]["voted"], false);
    for voter in voters {
        assert!(voter.get("token").is_none());
    }
}

#[tokio::test]
async fn test_concurrent_double_submission_commits_once() {
    let app = create_test_app();
    let group = create_group(&app, "Awards", 5).await;
    apply_setup(&app, &group, &["best_film"]).await;
    let guests = issue_guests(&app, &group, 1).await;

    let context = ballot_context(&app, &group, &guests[0]).await;
    let ballot = full_ballot(&context, 0);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let app = app.clone();
        let code = group.code.clone();
        let token = guests[0].clone();
        let ballot = ballot.clone();
        handles.push(tokio::spawn(async move {
            let group = TestGroup {
                code,
                host_key: String::new(),
            };
            submit_ballot(&app, &group, &token, ballot).await.status()
        }));
    }

    let mut committed = 0;
    for handle in handles {
        if handle.await.unwrap() == StatusCode::CREATED {
            committed += 1;
        }
    }
    assert_eq!(committed, 1);
}

/// End-to-end: capacity 4, three guests, two categories, two ballots reach
/// the threshold, reveal freezes the third guest out.
#[tokio::test]
async fn test_full_group_lifecycle() {
    let app = create_test_app();
    let group = create_group(&app, "Movie Night", 4).await;
    apply_setup(&app, &group, &["best_film", "best_score"]).await;
    let guests = issue_guests(&app, &group, 3).await;

    // A fourth guest would exceed capacity.
    let response = send_json(
        &app,
        Method::POST,
        &format!("/api/v1/groups/{}/invites?k={}", group.code, group.host_key),
        json!({ "count": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Two guests vote; threshold is ceil(4/2) = 2.
    vote(&app, &group, &guests[0]).await;
    let status = get_status(&app, &group).await;
    assert_eq!(status["can_reveal"], false);

    vote(&app, &group, &guests[1]).await;
    let status = get_status(&app, &group).await;
    assert_eq!(status["counts"]["voted"], 2);
    assert_eq!(status["can_reveal"], true);

    assert_eq!(reveal(&app, &group).await.status(), StatusCode::OK);

    // The late guest is frozen out.
    let context = ballot_context(&app, &group, &guests[2]).await;
    let ballot = full_ballot(&context, 0);
    let response = submit_ballot(&app, &group, &guests[2], ballot).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Results are readable by everyone.
    let response = send_get(
        &app,
        &format!("/api/v1/groups/{}/public-results", group.code),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}
