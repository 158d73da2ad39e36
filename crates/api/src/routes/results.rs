//! Status, reveal, and results.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use domain::error::DomainError;
use domain::models::results::{
    PublicResultsResponse, ResultsGroupInfo, ResultsResponse, RevealResponse, StatusCounts,
    StatusGroupInfo, StatusResponse, VoterInfo,
};
use domain::services::reveal::{can_reveal, reveal_threshold};
use domain::services::tally::compute_results;
use domain::store::GroupRecord;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::HostToken;
use crate::routes::{authorize_host, find_group};

/// Host-facing group status and the reveal gate.
///
/// GET /api/v1/groups/:code/status?k=<host key>
pub async fn get_status(
    State(state): State<AppState>,
    Path(code): Path<String>,
    HostToken(token): HostToken,
) -> Result<Json<StatusResponse>, ApiError> {
    let (group, _host) = authorize_host(&state, &code, &token).await?;

    let counts = state
        .store
        .invite_counts(group.id)
        .await
        .map_err(DomainError::from)?;

    Ok(Json(StatusResponse {
        can_reveal: can_reveal(group.reveal_at, group.max_members, counts.voted),
        group: StatusGroupInfo {
            title: group.title,
            reveal_at: group.reveal_at,
            max_members: group.max_members,
        },
        counts: StatusCounts {
            total_invites: counts.total,
            voted: counts.voted,
        },
    }))
}

/// Reveal the results, freezing the ballot set.
///
/// POST /api/v1/groups/:code/reveal?k=<host key>
///
/// Idempotent: once revealed, repeated calls return the original
/// timestamp. Before that, the participation threshold must be met.
pub async fn reveal(
    State(state): State<AppState>,
    Path(code): Path<String>,
    HostToken(token): HostToken,
) -> Result<Json<RevealResponse>, ApiError> {
    let (group, _host) = authorize_host(&state, &code, &token).await?;

    if let Some(reveal_at) = group.reveal_at {
        return Ok(Json(RevealResponse { reveal_at }));
    }

    let counts = state
        .store
        .invite_counts(group.id)
        .await
        .map_err(DomainError::from)?;

    if !can_reveal(group.reveal_at, group.max_members, counts.voted) {
        return Err(ApiError(DomainError::RevealNotReady {
            threshold: reveal_threshold(group.max_members),
            voted: counts.voted,
        }));
    }

    let reveal_at = state
        .store
        .reveal(group.id, Utc::now())
        .await
        .map_err(DomainError::from)?;

    info!(code = %group.code, voted = counts.voted, "Results revealed");

    Ok(Json(RevealResponse { reveal_at }))
}

/// Host-facing results. Requires a prior reveal.
///
/// GET /api/v1/groups/:code/results?k=<host key>
pub async fn get_results(
    State(state): State<AppState>,
    Path(code): Path<String>,
    HostToken(token): HostToken,
) -> Result<Json<ResultsResponse>, ApiError> {
    let (group, _host) = authorize_host(&state, &code, &token).await?;

    if group.reveal_at.is_none() {
        return Err(ApiError(DomainError::NotRevealedYet));
    }

    let results = tally(&state, &group).await?;

    Ok(Json(ResultsResponse {
        group: group_info(&group),
        results,
    }))
}

/// Public results: no token required once revealed. Adds per-invite
/// participation, never tokens.
///
/// GET /api/v1/groups/:code/public-results
pub async fn get_public_results(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<PublicResultsResponse>, ApiError> {
    let group = find_group(&state, &code).await?;

    if group.reveal_at.is_none() {
        return Err(ApiError(DomainError::NotRevealedYet));
    }

    let results = tally(&state, &group).await?;

    let voters = state
        .store
        .voters_for_group(group.id)
        .await
        .map_err(DomainError::from)?
        .into_iter()
        .map(|v| VoterInfo {
            display_name: v.display_name,
            voted: v.voted,
        })
        .collect();

    Ok(Json(PublicResultsResponse {
        group: group_info(&group),
        results,
        voters,
    }))
}

async fn tally(
    state: &AppState,
    group: &GroupRecord,
) -> Result<Vec<domain::models::results::CategoryResult>, ApiError> {
    let categories = state
        .store
        .categories_with_nominees(group.id)
        .await
        .map_err(DomainError::from)?;

    let votes = state
        .store
        .votes_for_group(group.id)
        .await
        .map_err(DomainError::from)?;

    Ok(compute_results(&categories, &votes))
}

fn group_info(group: &GroupRecord) -> ResultsGroupInfo {
    ResultsGroupInfo {
        title: group.title.clone(),
        code: group.code.clone(),
        reveal_at: group.reveal_at,
    }
}
