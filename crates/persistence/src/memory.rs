//! In-memory record store.
//!
//! All tables live behind one `RwLock`; compound operations hold the write
//! guard for their whole body with no awaits inside, which makes each of
//! them a single serialization point. Used by integration tests and local
//! development without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use domain::store::{
    CategoryRecord, GroupRecord, InviteCounts, InviteRecord, IssueOutcome, NewCategory, NewGroup,
    NewInvite, NomineeRecord, RecordStore, SetupOutcome, StoreError, SubmitOutcome, VoteRecord,
    VoterRecord,
};

#[derive(Debug, Clone)]
struct CategoryRow {
    id: Uuid,
    group_id: Uuid,
    name: String,
    sort_order: u32,
}

#[derive(Debug, Clone)]
struct NomineeRow {
    id: Uuid,
    category_id: Uuid,
    name: String,
    sort_order: u32,
}

#[derive(Debug, Clone)]
struct BallotRow {
    id: Uuid,
    group_id: Uuid,
    invite_id: Uuid,
}

#[derive(Debug, Clone)]
struct VoteRow {
    ballot_id: Uuid,
    category_id: Uuid,
    nominee_id: Uuid,
}

/// Invite row plus an insertion sequence, so listing order is stable even
/// when created_at timestamps collide.
#[derive(Debug, Clone)]
struct InviteRow {
    record: InviteRecord,
    seq: u64,
}

#[derive(Default)]
struct Tables {
    groups: HashMap<Uuid, GroupRecord>,
    invites: Vec<InviteRow>,
    categories: Vec<CategoryRow>,
    nominees: Vec<NomineeRow>,
    ballots: Vec<BallotRow>,
    votes: Vec<VoteRow>,
    next_seq: u64,
}

impl Tables {
    fn insert_invite(&mut self, group_id: Uuid, invite: &NewInvite) -> InviteRecord {
        let record = InviteRecord {
            id: Uuid::new_v4(),
            group_id,
            token: invite.token.clone(),
            display_name: invite.display_name.clone(),
            role: invite.role,
            used_at: None,
            created_at: Utc::now(),
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.invites.push(InviteRow {
            record: record.clone(),
            seq,
        });
        record
    }

    fn group_invites(&self, group_id: Uuid) -> Vec<&InviteRow> {
        let mut rows: Vec<&InviteRow> = self
            .invites
            .iter()
            .filter(|row| row.record.group_id == group_id)
            .collect();
        rows.sort_by_key(|row| row.seq);
        rows
    }
}

/// Record store held entirely in process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_group(
        &self,
        group: NewGroup,
        host: NewInvite,
    ) -> Result<GroupRecord, StoreError> {
        let mut tables = self.tables.write().await;
        let record = GroupRecord {
            id: Uuid::new_v4(),
            code: group.code,
            title: group.title,
            max_members: group.max_members,
            reveal_at: None,
            created_at: Utc::now(),
        };
        tables.groups.insert(record.id, record.clone());
        tables.insert_invite(record.id, &host);
        Ok(record)
    }

    async fn find_group_by_code(&self, code: &str) -> Result<Option<GroupRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.values().find(|g| g.code == code).cloned())
    }

    async fn group_code_exists(&self, code: &str) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.values().any(|g| g.code == code))
    }

    async fn find_invite_by_token(
        &self,
        group_id: Uuid,
        token: &str,
    ) -> Result<Option<InviteRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .invites
            .iter()
            .find(|row| row.record.group_id == group_id && row.record.token == token)
            .map(|row| row.record.clone()))
    }

    async fn find_invite_by_id(
        &self,
        invite_id: Uuid,
    ) -> Result<Option<InviteRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .invites
            .iter()
            .find(|row| row.record.id == invite_id)
            .map(|row| row.record.clone()))
    }

    async fn list_invites(&self, group_id: Uuid) -> Result<Vec<InviteRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_invites(group_id)
            .into_iter()
            .map(|row| row.record.clone())
            .collect())
    }

    async fn issue_invites(
        &self,
        group_id: Uuid,
        invites: Vec<NewInvite>,
        max_members: u32,
    ) -> Result<IssueOutcome, StoreError> {
        let mut tables = self.tables.write().await;
        let existing = tables
            .invites
            .iter()
            .filter(|row| row.record.group_id == group_id)
            .count() as u32;
        if existing as u64 + invites.len() as u64 > max_members as u64 {
            return Ok(IssueOutcome::CapacityExceeded { existing });
        }
        let created = invites
            .iter()
            .map(|invite| tables.insert_invite(group_id, invite))
            .collect();
        Ok(IssueOutcome::Created(created))
    }

    async fn rename_invite(
        &self,
        invite_id: Uuid,
        display_name: &str,
    ) -> Result<Option<InviteRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .invites
            .iter_mut()
            .find(|row| row.record.id == invite_id);
        Ok(row.map(|row| {
            row.record.display_name = display_name.to_owned();
            row.record.clone()
        }))
    }

    async fn replace_setup(
        &self,
        group_id: Uuid,
        categories: Vec<NewCategory>,
    ) -> Result<SetupOutcome, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.ballots.iter().any(|b| b.group_id == group_id) {
            return Ok(SetupOutcome::Locked);
        }

        let old_categories: Vec<Uuid> = tables
            .categories
            .iter()
            .filter(|c| c.group_id == group_id)
            .map(|c| c.id)
            .collect();
        tables.categories.retain(|c| c.group_id != group_id);
        tables
            .nominees
            .retain(|n| !old_categories.contains(&n.category_id));

        let mut nominee_count = 0usize;
        for category in &categories {
            let category_id = Uuid::new_v4();
            tables.categories.push(CategoryRow {
                id: category_id,
                group_id,
                name: category.name.clone(),
                sort_order: category.sort_order,
            });
            for (index, nominee) in category.nominees.iter().enumerate() {
                tables.nominees.push(NomineeRow {
                    id: Uuid::new_v4(),
                    category_id,
                    name: nominee.clone(),
                    sort_order: (index + 1) as u32,
                });
                nominee_count += 1;
            }
        }

        Ok(SetupOutcome::Replaced {
            categories: categories.len(),
            nominees: nominee_count,
        })
    }

    async fn categories_with_nominees(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        let tables = self.tables.read().await;
        let mut categories: Vec<&CategoryRow> = tables
            .categories
            .iter()
            .filter(|c| c.group_id == group_id)
            .collect();
        categories.sort_by_key(|c| c.sort_order);

        Ok(categories
            .into_iter()
            .map(|category| {
                let mut nominees: Vec<NomineeRecord> = tables
                    .nominees
                    .iter()
                    .filter(|n| n.category_id == category.id)
                    .map(|n| NomineeRecord {
                        id: n.id,
                        name: n.name.clone(),
                        sort_order: n.sort_order,
                    })
                    .collect();
                nominees.sort_by_key(|n| n.sort_order);
                CategoryRecord {
                    id: category.id,
                    name: category.name.clone(),
                    sort_order: category.sort_order,
                    nominees,
                }
            })
            .collect())
    }

    async fn has_ballots(&self, group_id: Uuid) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.ballots.iter().any(|b| b.group_id == group_id))
    }

    async fn submit_ballot(
        &self,
        group_id: Uuid,
        invite_id: Uuid,
        votes: Vec<VoteRecord>,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, StoreError> {
        let mut tables = self.tables.write().await;

        let closed = tables
            .groups
            .get(&group_id)
            .and_then(|g| g.reveal_at)
            .is_some();
        if closed {
            return Ok(SubmitOutcome::VotingClosed);
        }

        let invite = tables
            .invites
            .iter_mut()
            .find(|row| row.record.id == invite_id && row.record.group_id == group_id);
        match invite {
            Some(row) if row.record.used_at.is_none() => {
                row.record.used_at = Some(now);
            }
            _ => return Ok(SubmitOutcome::AlreadyVoted),
        }

        let ballot_id = Uuid::new_v4();
        tables.ballots.push(BallotRow {
            id: ballot_id,
            group_id,
            invite_id,
        });
        for vote in votes {
            tables.votes.push(VoteRow {
                ballot_id,
                category_id: vote.category_id,
                nominee_id: vote.nominee_id,
            });
        }
        Ok(SubmitOutcome::Committed { ballot_id })
    }

    async fn invite_counts(&self, group_id: Uuid) -> Result<InviteCounts, StoreError> {
        let tables = self.tables.read().await;
        let mut counts = InviteCounts { total: 0, voted: 0 };
        for row in tables.invites.iter() {
            if row.record.group_id == group_id {
                counts.total += 1;
                if row.record.used_at.is_some() {
                    counts.voted += 1;
                }
            }
        }
        Ok(counts)
    }

    async fn reveal(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, StoreError> {
        let mut tables = self.tables.write().await;
        let group = tables
            .groups
            .get_mut(&group_id)
            .ok_or_else(|| StoreError::Database("group not found".to_owned()))?;
        Ok(*group.reveal_at.get_or_insert(now))
    }

    async fn votes_for_group(&self, group_id: Uuid) -> Result<Vec<VoteRecord>, StoreError> {
        let tables = self.tables.read().await;
        let ballot_ids: Vec<Uuid> = tables
            .ballots
            .iter()
            .filter(|b| b.group_id == group_id)
            .map(|b| b.id)
            .collect();
        Ok(tables
            .votes
            .iter()
            .filter(|v| ballot_ids.contains(&v.ballot_id))
            .map(|v| VoteRecord {
                category_id: v.category_id,
                nominee_id: v.nominee_id,
            })
            .collect())
    }

    async fn voters_for_group(&self, group_id: Uuid) -> Result<Vec<VoterRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .group_invites(group_id)
            .into_iter()
            .map(|row| VoterRecord {
                display_name: row.record.display_name.clone(),
                voted: row.record.used_at.is_some(),
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
