//! Record-store interface.
//!
//! The persistent record store is an external collaborator: a transactional
//! relational store exposed through point lookups, inserts, updates, and
//! filtered counts. This trait is the whole surface the domain needs. Four
//! compound operations must each execute as one atomic unit (see their
//! docs); implementations either run them in a store transaction or behind
//! a serialization point, closing the check-then-act races around ballot
//! submission and invite capacity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Backing-store failure. Not locally recoverable; the request aborts.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Database(String),
}

/// Role of an invite within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteRole {
    Host,
    Guest,
}

/// A persisted group.
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub max_members: u32,
    /// Null = hidden, set = revealed. Monotonic: once set, never cleared.
    pub reveal_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A persisted invite.
#[derive(Debug, Clone)]
pub struct InviteRecord {
    pub id: Uuid,
    pub group_id: Uuid,
    pub token: String,
    pub display_name: String,
    pub role: InviteRole,
    /// Set when the invite's ballot is cast. Monotonic.
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A persisted nominee within a category.
#[derive(Debug, Clone)]
pub struct NomineeRecord {
    pub id: Uuid,
    pub name: String,
    pub sort_order: u32,
}

/// A persisted category together with its nominees in sort order.
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub sort_order: u32,
    pub nominees: Vec<NomineeRecord>,
}

/// A single persisted vote (category, nominee) pair.
#[derive(Debug, Clone)]
pub struct VoteRecord {
    pub category_id: Uuid,
    pub nominee_id: Uuid,
}

/// Invite-level participation for the public results view.
#[derive(Debug, Clone)]
pub struct VoterRecord {
    pub display_name: String,
    pub voted: bool,
}

/// Invite counts for a group.
#[derive(Debug, Clone, Copy)]
pub struct InviteCounts {
    pub total: u32,
    pub voted: u32,
}

/// Input for creating a group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub code: String,
    pub title: String,
    pub max_members: u32,
}

/// Input for creating an invite.
#[derive(Debug, Clone)]
pub struct NewInvite {
    pub token: String,
    pub display_name: String,
    pub role: InviteRole,
}

/// Input for one category (with nominees) in a setup replacement.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub sort_order: u32,
    /// Nominee names in display order; persisted sort_order is 1..N.
    pub nominees: Vec<String>,
}

/// Outcome of the atomic capacity check + invite insert.
#[derive(Debug)]
pub enum IssueOutcome {
    Created(Vec<InviteRecord>),
    CapacityExceeded { existing: u32 },
}

/// Outcome of the atomic setup replacement.
#[derive(Debug)]
pub enum SetupOutcome {
    Replaced { categories: usize, nominees: usize },
    /// A ballot already exists; existing rows are left unchanged.
    Locked,
}

/// Outcome of the atomic ballot commit.
#[derive(Debug)]
pub enum SubmitOutcome {
    Committed { ballot_id: Uuid },
    /// The invite's used_at was already set when the unit executed.
    AlreadyVoted,
    /// The group's reveal_at was set when the unit executed.
    VotingClosed,
}

/// The persistent record store.
///
/// All mutation is scoped by group or invite id; cross-group checks are the
/// caller's mandatory authorization step, not the store's.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a group and its host invite as one atomic unit.
    async fn create_group(
        &self,
        group: NewGroup,
        host: NewInvite,
    ) -> Result<GroupRecord, StoreError>;

    async fn find_group_by_code(&self, code: &str) -> Result<Option<GroupRecord>, StoreError>;

    async fn group_code_exists(&self, code: &str) -> Result<bool, StoreError>;

    async fn find_invite_by_token(
        &self,
        group_id: Uuid,
        token: &str,
    ) -> Result<Option<InviteRecord>, StoreError>;

    async fn find_invite_by_id(&self, invite_id: Uuid)
        -> Result<Option<InviteRecord>, StoreError>;

    /// Lists a group's invites in creation order, ties broken by id, so the
    /// order never jitters across polls with equal timestamps.
    async fn list_invites(&self, group_id: Uuid) -> Result<Vec<InviteRecord>, StoreError>;

    /// Atomic unit: count existing invites, reject wholesale if the batch
    /// would exceed `max_members`, otherwise insert all rows.
    async fn issue_invites(
        &self,
        group_id: Uuid,
        invites: Vec<NewInvite>,
        max_members: u32,
    ) -> Result<IssueOutcome, StoreError>;

    /// Updates an invite's display name. Returns None if the invite is absent.
    async fn rename_invite(
        &self,
        invite_id: Uuid,
        display_name: &str,
    ) -> Result<Option<InviteRecord>, StoreError>;

    /// Atomic unit: if no ballot exists for the group, delete all categories
    /// (cascading to nominees) and insert the replacement set. Readers never
    /// observe the intermediate empty state.
    async fn replace_setup(
        &self,
        group_id: Uuid,
        categories: Vec<NewCategory>,
    ) -> Result<SetupOutcome, StoreError>;

    /// The group's categories in sort order, each with nominees in sort order.
    async fn categories_with_nominees(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<CategoryRecord>, StoreError>;

    async fn has_ballots(&self, group_id: Uuid) -> Result<bool, StoreError>;

    /// Atomic unit: re-check reveal_at and the invite's used_at, insert the
    /// ballot and its votes, and mark the invite used. A concurrent call
    /// with the same invite commits at most one ballot.
    async fn submit_ballot(
        &self,
        group_id: Uuid,
        invite_id: Uuid,
        votes: Vec<VoteRecord>,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, StoreError>;

    async fn invite_counts(&self, group_id: Uuid) -> Result<InviteCounts, StoreError>;

    /// Sets reveal_at to `now` if it is null, and returns the effective
    /// value. Monotonic: an already-set timestamp is returned unchanged.
    async fn reveal(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, StoreError>;

    /// Every vote across all of the group's ballots.
    async fn votes_for_group(&self, group_id: Uuid) -> Result<Vec<VoteRecord>, StoreError>;

    /// The group's invites as display name + voted flag, never tokens.
    async fn voters_for_group(&self, group_id: Uuid) -> Result<Vec<VoterRecord>, StoreError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
