//! Route handlers.

pub mod ballots;
pub mod groups;
pub mod health;
pub mod invites;
pub mod results;
pub mod setup;

use domain::error::DomainError;
use domain::store::{GroupRecord, InviteRecord, InviteRole};

use crate::app::AppState;
use crate::error::ApiError;

/// Resolves a group by its public code, before any token check.
pub(crate) async fn find_group(state: &AppState, code: &str) -> Result<GroupRecord, ApiError> {
    state
        .store
        .find_group_by_code(code)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError(DomainError::NotFound("Group not found".into())))
}

/// Resolves a group and checks that the presented key belongs to its host.
pub(crate) async fn authorize_host(
    state: &AppState,
    code: &str,
    token: &str,
) -> Result<(GroupRecord, InviteRecord), ApiError> {
    let group = find_group(state, code).await?;
    let invite = state
        .store
        .find_invite_by_token(group.id, token)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError(DomainError::Unauthorized("Invalid host key".into())))?;

    if invite.role != InviteRole::Host {
        return Err(ApiError(DomainError::Unauthorized(
            "Invalid host key".into(),
        )));
    }

    Ok((group, invite))
}
