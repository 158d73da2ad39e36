use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use domain::error::DomainError;

/// HTTP-facing wrapper around the domain error taxonomy.
///
/// Every domain variant maps to exactly one status code and one
/// machine-stable `error` string; store failures are logged and surface as
/// an opaque 500.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError(DomainError::from(errors))
    }
}

impl From<domain::store::StoreError> for ApiError {
    fn from(err: domain::store::StoreError) -> Self {
        ApiError(DomainError::Store(err))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            DomainError::CapacityExceeded { .. } => (StatusCode::BAD_REQUEST, "capacity_exceeded"),
            DomainError::SetupLocked => (StatusCode::CONFLICT, "setup_locked"),
            DomainError::AlreadyVoted => (StatusCode::CONFLICT, "already_voted"),
            DomainError::VotingClosed => (StatusCode::FORBIDDEN, "voting_closed"),
            DomainError::NotConfigured => (StatusCode::BAD_REQUEST, "not_configured"),
            DomainError::IncompleteBallot { .. } => (StatusCode::BAD_REQUEST, "incomplete_ballot"),
            DomainError::InvalidCategory => (StatusCode::BAD_REQUEST, "invalid_category"),
            DomainError::DuplicateCategoryVote => {
                (StatusCode::BAD_REQUEST, "duplicate_category_vote")
            }
            DomainError::InvalidNominee => (StatusCode::BAD_REQUEST, "invalid_nominee"),
            DomainError::RevealNotReady { .. } => (StatusCode::CONFLICT, "reveal_not_ready"),
            DomainError::NotRevealedYet => (StatusCode::FORBIDDEN, "not_revealed_yet"),
            DomainError::Store(err) => {
                tracing::error!("Store error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let message = match &self.0 {
            // Never leak store details to clients.
            DomainError::Store(_) => "Unknown error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
