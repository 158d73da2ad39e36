use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::ApiError;
use domain::error::DomainError;

/// Invite token from the `t` query parameter.
#[derive(Debug, Clone)]
pub struct InviteToken(pub String);

#[derive(Debug, Deserialize)]
struct InviteTokenQuery {
    t: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for InviteToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<InviteTokenQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError(DomainError::Unauthorized("Missing invite token".into())))?;

        match query.t {
            Some(t) if !t.is_empty() => Ok(InviteToken(t)),
            _ => Err(ApiError(DomainError::Unauthorized(
                "Missing invite token".into(),
            ))),
        }
    }
}
