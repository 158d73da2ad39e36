//! Group creation.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use validator::Validate;

use domain::error::DomainError;
use domain::models::group::{CreateGroupRequest, CreateGroupResponse};
use domain::store::{InviteRole, NewGroup, NewInvite, StoreError};
use shared::crypto::{generate_group_code, generate_invite_token};

use crate::app::AppState;
use crate::error::ApiError;

/// Bound on retries when a freshly generated code collides.
const MAX_CODE_ATTEMPTS: usize = 100;

/// Create a new group with its host invite.
///
/// POST /api/v1/groups
pub async fn create_group(
    State(state): State<AppState>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<CreateGroupResponse>), ApiError> {
    request.validate()?;

    let cap = state.config.limits.max_group_members;
    if request.max_members > cap {
        return Err(ApiError(DomainError::Validation(format!(
            "max_members cannot exceed {}",
            cap
        ))));
    }

    let code = allocate_code(&state).await?;
    let host_token = generate_invite_token();

    let group = state
        .store
        .create_group(
            NewGroup {
                code: code.clone(),
                title: request.title.trim().to_owned(),
                max_members: request.max_members,
            },
            NewInvite {
                token: host_token.clone(),
                display_name: request.host_name.trim().to_owned(),
                role: InviteRole::Host,
            },
        )
        .await
        .map_err(DomainError::from)?;

    info!(
        code = %group.code,
        max_members = group.max_members,
        "Group created"
    );

    let admin_link = format!(
        "{}/host/{}?k={}",
        state.config.server.app_base_url.trim_end_matches('/'),
        group.code,
        host_token
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateGroupResponse {
            code: group.code,
            admin_link,
        }),
    ))
}

/// Draws random codes until one is unused, bounded by MAX_CODE_ATTEMPTS.
async fn allocate_code(state: &AppState) -> Result<String, ApiError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_group_code();
        if !state
            .store
            .group_code_exists(&code)
            .await
            .map_err(DomainError::from)?
        {
            return Ok(code);
        }
    }
    Err(ApiError(DomainError::Store(StoreError::Database(
        "could not allocate a unique group code".into(),
    ))))
}
