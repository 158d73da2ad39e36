//! Ballot context and submission.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use domain::error::DomainError;
use domain::models::ballot::{BallotContextResponse, SubmitBallotRequest, SubmitBallotResponse};
use domain::services::ballot::validate_ballot;
use domain::store::{SubmitOutcome, VoteRecord};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::InviteToken;
use crate::routes::find_group;

/// Everything a participant needs to render their ballot.
///
/// GET /api/v1/groups/:code/ballot?t=<invite token>
///
/// Always returns the structure; `already_voted` and an empty category
/// list are states the client renders, not errors.
pub async fn get_ballot_context(
    State(state): State<AppState>,
    Path(code): Path<String>,
    InviteToken(token): InviteToken,
) -> Result<Json<BallotContextResponse>, ApiError> {
    let group = find_group(&state, &code).await?;

    let invite = state
        .store
        .find_invite_by_token(group.id, &token)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError(DomainError::Unauthorized("Invalid invite token".into())))?;

    let categories = state
        .store
        .categories_with_nominees(group.id)
        .await
        .map_err(DomainError::from)?;

    Ok(Json(BallotContextResponse::from_records(
        &group, &invite, &categories,
    )))
}

/// Submit the invite's single ballot.
///
/// POST /api/v1/groups/:code/ballot?t=<invite token>
///
/// Checks run in a fixed order: closed voting, token, prior ballot,
/// ballot shape. The commit itself re-checks the first three inside the
/// store's atomic unit, so two concurrent submissions for the same invite
/// produce exactly one ballot.
pub async fn submit_ballot(
    State(state): State<AppState>,
    Path(code): Path<String>,
    InviteToken(token): InviteToken,
    Json(request): Json<SubmitBallotRequest>,
) -> Result<(StatusCode, Json<SubmitBallotResponse>), ApiError> {
    let group = find_group(&state, &code).await?;

    if group.reveal_at.is_some() {
        return Err(ApiError(DomainError::VotingClosed));
    }

    let invite = state
        .store
        .find_invite_by_token(group.id, &token)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError(DomainError::Unauthorized("Invalid invite token".into())))?;

    if invite.used_at.is_some() {
        return Err(ApiError(DomainError::AlreadyVoted));
    }

    let categories = state
        .store
        .categories_with_nominees(group.id)
        .await
        .map_err(DomainError::from)?;

    validate_ballot(&request.votes, &categories)?;

    let votes: Vec<VoteRecord> = request
        .votes
        .iter()
        .map(|v| VoteRecord {
            category_id: v.category_id,
            nominee_id: v.nominee_id,
        })
        .collect();

    let outcome = state
        .store
        .submit_ballot(group.id, invite.id, votes, Utc::now())
        .await
        .map_err(DomainError::from)?;

    match outcome {
        SubmitOutcome::Committed { ballot_id } => {
            info!(code = %group.code, ballot_id = %ballot_id, "Ballot committed");
            Ok((
                StatusCode::CREATED,
                Json(SubmitBallotResponse { ballot_id }),
            ))
        }
        SubmitOutcome::AlreadyVoted => Err(ApiError(DomainError::AlreadyVoted)),
        SubmitOutcome::VotingClosed => Err(ApiError(DomainError::VotingClosed)),
    }
}
