//! Ballot domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{CategoryRecord, GroupRecord, InviteRecord, InviteRole};

/// One (category, nominee) pick inside a ballot submission.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct VoteItem {
    pub category_id: Uuid,
    pub nominee_id: Uuid,
}

/// Request to submit a participant's single ballot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitBallotRequest {
    #[serde(default)]
    pub votes: Vec<VoteItem>,
}

/// Response after a committed ballot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitBallotResponse {
    pub ballot_id: Uuid,
}

/// Everything a participant client needs to render the ballot form, the
/// "already voted" state, and the "not set up" state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BallotContextResponse {
    pub group: BallotGroupInfo,
    pub invite: BallotInviteInfo,
    pub already_voted: bool,
    pub categories: Vec<BallotCategory>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BallotGroupInfo {
    pub title: String,
    pub code: String,
    pub reveal_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BallotInviteInfo {
    pub display_name: String,
    pub role: InviteRole,
    pub used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BallotCategory {
    pub id: Uuid,
    pub name: String,
    pub nominees: Vec<BallotNominee>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BallotNominee {
    pub id: Uuid,
    pub name: String,
}

impl BallotContextResponse {
    /// Assembles the context from persisted records, preserving sort order.
    pub fn from_records(
        group: &GroupRecord,
        invite: &InviteRecord,
        categories: &[CategoryRecord],
    ) -> Self {
        Self {
            group: BallotGroupInfo {
                title: group.title.clone(),
                code: group.code.clone(),
                reveal_at: group.reveal_at,
            },
            invite: BallotInviteInfo {
                display_name: invite.display_name.clone(),
                role: invite.role,
                used_at: invite.used_at,
            },
            already_voted: invite.used_at.is_some(),
            categories: categories
                .iter()
                .map(|c| BallotCategory {
                    id: c.id,
                    name: c.name.clone(),
                    nominees: c
                        .nominees
                        .iter()
                        .map(|n| BallotNominee {
                            id: n.id,
                            name: n.name.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
