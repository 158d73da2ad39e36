//! Invite domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::store::{InviteRecord, InviteRole};

/// Request to issue guest invites against a group's remaining capacity.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct IssueInvitesRequest {
    #[validate(range(min = 1, message = "count must be at least 1"))]
    pub count: u32,
}

/// Request to rename an invite.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RenameInviteRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub display_name: String,
}

/// Host-facing view of an invite. Includes the token: the host distributes
/// the invite links.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteSummary {
    pub id: Uuid,
    pub display_name: String,
    pub role: InviteRole,
    pub token: String,
    pub used_at: Option<DateTime<Utc>>,
}

impl From<InviteRecord> for InviteSummary {
    fn from(record: InviteRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.display_name,
            role: record.role,
            token: record.token,
            used_at: record.used_at,
        }
    }
}

/// Response for listing or issuing invites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitesResponse {
    pub data: Vec<InviteSummary>,
}
