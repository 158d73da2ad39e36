//! Invite management: issue, list, rename.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::error::DomainError;
use domain::models::invite::{
    InviteSummary, IssueInvitesRequest, ListInvitesResponse, RenameInviteRequest,
};
use domain::store::{InviteRole, IssueOutcome, NewInvite};
use shared::crypto::generate_invite_token;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::HostToken;
use crate::routes::authorize_host;

/// Issue guest invites against the group's remaining capacity.
///
/// POST /api/v1/groups/:code/invites?k=<host key>
///
/// All-or-nothing: a batch that would exceed max_members creates nothing.
pub async fn issue_invites(
    State(state): State<AppState>,
    Path(code): Path<String>,
    HostToken(token): HostToken,
    Json(request): Json<IssueInvitesRequest>,
) -> Result<(StatusCode, Json<ListInvitesResponse>), ApiError> {
    request.validate()?;

    let (group, _host) = authorize_host(&state, &code, &token).await?;

    // A batch larger than the whole group can never fit. Reject it here so
    // no tokens are generated for it; the store's transactional count still
    // decides batches that depend on how many seats are taken.
    if request.count > group.max_members {
        let counts = state
            .store
            .invite_counts(group.id)
            .await
            .map_err(DomainError::from)?;
        return Err(ApiError(DomainError::CapacityExceeded {
            existing: counts.total,
            requested: request.count,
            max_members: group.max_members,
        }));
    }

    let invites: Vec<NewInvite> = (0..request.count)
        .map(|_| NewInvite {
            token: generate_invite_token(),
            display_name: "Guest".into(),
            role: InviteRole::Guest,
        })
        .collect();

    let outcome = state
        .store
        .issue_invites(group.id, invites, group.max_members)
        .await
        .map_err(DomainError::from)?;

    match outcome {
        IssueOutcome::Created(records) => {
            info!(
                code = %group.code,
                count = records.len(),
                "Invites issued"
            );
            Ok((
                StatusCode::CREATED,
                Json(ListInvitesResponse {
                    data: records.into_iter().map(InviteSummary::from).collect(),
                }),
            ))
        }
        IssueOutcome::CapacityExceeded { existing } => {
            Err(ApiError(DomainError::CapacityExceeded {
                existing,
                requested: request.count,
                max_members: group.max_members,
            }))
        }
    }
}

/// List a group's invites in creation order.
///
/// GET /api/v1/groups/:code/invites?k=<host key>
pub async fn list_invites(
    State(state): State<AppState>,
    Path(code): Path<String>,
    HostToken(token): HostToken,
) -> Result<Json<ListInvitesResponse>, ApiError> {
    let (group, _host) = authorize_host(&state, &code, &token).await?;

    let invites = state
        .store
        .list_invites(group.id)
        .await
        .map_err(DomainError::from)?;

    Ok(Json(ListInvitesResponse {
        data: invites.into_iter().map(InviteSummary::from).collect(),
    }))
}

/// Rename an invite.
///
/// PATCH /api/v1/groups/:code/invites/:invite_id?k=<host key>
pub async fn rename_invite(
    State(state): State<AppState>,
    Path((code, invite_id)): Path<(String, Uuid)>,
    HostToken(token): HostToken,
    Json(request): Json<RenameInviteRequest>,
) -> Result<Json<InviteSummary>, ApiError> {
    request.validate()?;

    let (group, _host) = authorize_host(&state, &code, &token).await?;

    let invite = state
        .store
        .find_invite_by_id(invite_id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError(DomainError::NotFound("Invite not found".into())))?;

    if invite.group_id != group.id {
        return Err(ApiError(DomainError::Forbidden(
            "Invite belongs to a different group".into(),
        )));
    }

    let renamed = state
        .store
        .rename_invite(invite_id, request.display_name.trim())
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError(DomainError::NotFound("Invite not found".into())))?;

    info!(code = %group.code, invite_id = %invite_id, "Invite renamed");

    Ok(Json(InviteSummary::from(renamed)))
}
