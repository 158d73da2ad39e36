//! Setup management: select catalog categories into a group.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use domain::error::DomainError;
use domain::models::setup::{
    ApplySetupRequest, ApplySetupResponse, GetSetupResponse, InsertedCounts,
};
use domain::store::{NewCategory, SetupOutcome};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::HostToken;
use crate::routes::authorize_host;

/// Replace the group's category set with a selection from the catalog.
///
/// POST /api/v1/groups/:code/setup?k=<host key>
///
/// The whole set is regenerated: category and nominee ids change even for
/// keys that were already selected. Locked once any ballot exists.
pub async fn apply_setup(
    State(state): State<AppState>,
    Path(code): Path<String>,
    HostToken(token): HostToken,
    Json(request): Json<ApplySetupRequest>,
) -> Result<Json<ApplySetupResponse>, ApiError> {
    let (group, _host) = authorize_host(&state, &code, &token).await?;

    let selected = state.catalog.select(&request.category_keys);
    if selected.is_empty() {
        return Err(ApiError(DomainError::Validation(
            "No valid category keys selected".into(),
        )));
    }

    let categories: Vec<NewCategory> = selected
        .iter()
        .enumerate()
        .map(|(index, category)| NewCategory {
            name: category.name.clone(),
            sort_order: (index + 1) as u32,
            nominees: category.nominees.clone(),
        })
        .collect();

    let outcome = state
        .store
        .replace_setup(group.id, categories)
        .await
        .map_err(DomainError::from)?;

    match outcome {
        SetupOutcome::Replaced {
            categories,
            nominees,
        } => {
            info!(
                code = %group.code,
                categories,
                nominees,
                "Setup replaced"
            );
            Ok(Json(ApplySetupResponse {
                inserted: InsertedCounts {
                    categories,
                    nominees,
                },
            }))
        }
        SetupOutcome::Locked => Err(ApiError(DomainError::SetupLocked)),
    }
}

/// Current setup: selected catalog keys plus the lock flag.
///
/// GET /api/v1/groups/:code/setup?k=<host key>
///
/// Persisted categories whose names no longer match the catalog are
/// silently omitted.
pub async fn get_setup(
    State(state): State<AppState>,
    Path(code): Path<String>,
    HostToken(token): HostToken,
) -> Result<Json<GetSetupResponse>, ApiError> {
    let (group, _host) = authorize_host(&state, &code, &token).await?;

    let categories = state
        .store
        .categories_with_nominees(group.id)
        .await
        .map_err(DomainError::from)?;

    let category_keys = categories
        .iter()
        .filter_map(|c| state.catalog.key_for_name(&c.name))
        .map(str::to_owned)
        .collect();

    let has_votes = state
        .store
        .has_ballots(group.id)
        .await
        .map_err(DomainError::from)?;

    Ok(Json(GetSetupResponse {
        category_keys,
        has_votes,
    }))
}
