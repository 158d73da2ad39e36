//! Results, status, and reveal domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A nominee's standing within one category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NomineeResult {
    pub nominee_id: Uuid,
    pub nominee_name: String,
    pub votes: u32,
}

/// One category's ranked results.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CategoryResult {
    pub category_id: Uuid,
    pub category_name: String,
    /// Nominees ranked by descending vote count; ties keep persisted order.
    pub nominees: Vec<NomineeResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResultsGroupInfo {
    pub title: String,
    pub code: String,
    pub reveal_at: Option<DateTime<Utc>>,
}

/// Host-facing results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResultsResponse {
    pub group: ResultsGroupInfo,
    pub results: Vec<CategoryResult>,
}

/// Public results: adds per-invite participation, never tokens.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PublicResultsResponse {
    pub group: ResultsGroupInfo,
    pub results: Vec<CategoryResult>,
    pub voters: Vec<VoterInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VoterInfo {
    pub display_name: String,
    pub voted: bool,
}

/// Host-facing group status and reveal gate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusResponse {
    pub group: StatusGroupInfo,
    pub counts: StatusCounts,
    pub can_reveal: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusGroupInfo {
    pub title: String,
    pub reveal_at: Option<DateTime<Utc>>,
    pub max_members: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusCounts {
    pub total_invites: u32,
    pub voted: u32,
}

/// Response to a reveal request. Idempotent: repeated reveals return the
/// same timestamp.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RevealResponse {
    pub reveal_at: DateTime<Utc>,
}
