use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::ApiError;
use domain::error::DomainError;

/// Host key from the `k` query parameter.
///
/// Presence only; resolution against the group's invites happens in the
/// handler, after the group itself is found.
#[derive(Debug, Clone)]
pub struct HostToken(pub String);

#[derive(Debug, Deserialize)]
struct HostKeyQuery {
    k: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for HostToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<HostKeyQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError(DomainError::Unauthorized("Missing host key".into())))?;

        match query.k {
            Some(k) if !k.is_empty() => Ok(HostToken(k)),
            _ => Err(ApiError(DomainError::Unauthorized(
                "Missing host key".into(),
            ))),
        }
    }
}
