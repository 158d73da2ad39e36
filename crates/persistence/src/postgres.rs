//! PostgreSQL-backed record store.
//!
//! Compound operations run inside a transaction that takes a `FOR UPDATE`
//! lock on the group row, serializing writers per group. Uniqueness
//! constraints (groups.code, invites.token, ballots.invite_id) back the
//! same invariants at the schema level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use domain::store::{
    CategoryRecord, GroupRecord, InviteCounts, InviteRecord, IssueOutcome, NewCategory, NewGroup,
    NewInvite, RecordStore, SetupOutcome, StoreError, SubmitOutcome, VoteRecord, VoterRecord,
};

use crate::entities::{
    CategoryEntity, GroupEntity, InviteEntity, InviteRoleDb, NomineeEntity, VoteRowEntity,
    VoterEntity,
};

/// Record store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Locks the group row for the duration of the transaction. Returns
    /// None if the group does not exist.
    async fn lock_group(
        tx: &mut Transaction<'_, Postgres>,
        group_id: Uuid,
    ) -> Result<Option<GroupEntity>, sqlx::Error> {
        sqlx::query_as::<_, GroupEntity>(
            "SELECT id, code, title, max_members, reveal_at, created_at
             FROM groups WHERE id = $1 FOR UPDATE",
        )
        .bind(group_id)
        .fetch_optional(&mut **tx)
        .await
    }

    async fn insert_invite(
        tx: &mut Transaction<'_, Postgres>,
        group_id: Uuid,
        invite: &NewInvite,
    ) -> Result<InviteEntity, sqlx::Error> {
        sqlx::query_as::<_, InviteEntity>(
            "INSERT INTO invites (id, group_id, token, display_name, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, group_id, token, display_name, role, used_at, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(group_id)
        .bind(&invite.token)
        .bind(&invite.display_name)
        .bind(InviteRoleDb::from(invite.role))
        .fetch_one(&mut **tx)
        .await
    }
}

fn db_err(err: sqlx::Error) -> StoreError {
    StoreError::Database(err.to_string())
}

#[async_trait]
impl RecordStore for PgStore {
    async fn create_group(
        &self,
        group: NewGroup,
        host: NewInvite,
    ) -> Result<GroupRecord, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let entity = sqlx::query_as::<_, GroupEntity>(
            "INSERT INTO groups (id, code, title, max_members)
             VALUES ($1, $2, $3, $4)
             RETURNING id, code, title, max_members, reveal_at, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&group.code)
        .bind(&group.title)
        .bind(group.max_members as i32)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        Self::insert_invite(&mut tx, entity.id, &host)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(entity.into())
    }

    async fn find_group_by_code(&self, code: &str) -> Result<Option<GroupRecord>, StoreError> {
        let entity = sqlx::query_as::<_, GroupEntity>(
            "SELECT id, code, title, max_members, reveal_at, created_at
             FROM groups WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(entity.map(Into::into))
    }

    async fn group_code_exists(&self, code: &str) -> Result<bool, StoreError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM groups WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(exists.0)
    }

    async fn find_invite_by_token(
        &self,
        group_id: Uuid,
        token: &str,
    ) -> Result<Option<InviteRecord>, StoreError> {
        let entity = sqlx::query_as::<_, InviteEntity>(
            "SELECT id, group_id, token, display_name, role, used_at, created_at
             FROM invites WHERE group_id = $1 AND token = $2",
        )
        .bind(group_id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(entity.map(Into::into))
    }

    async fn find_invite_by_id(
        &self,
        invite_id: Uuid,
    ) -> Result<Option<InviteRecord>, StoreError> {
        let entity = sqlx::query_as::<_, InviteEntity>(
            "SELECT id, group_id, token, display_name, role, used_at, created_at
             FROM invites WHERE id = $1",
        )
        .bind(invite_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(entity.map(Into::into))
    }

    async fn list_invites(&self, group_id: Uuid) -> Result<Vec<InviteRecord>, StoreError> {
        let entities = sqlx::query_as::<_, InviteEntity>(
            "SELECT id, group_id, token, display_name, role, used_at, created_at
             FROM invites WHERE group_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    async fn issue_invites(
        &self,
        group_id: Uuid,
        invites: Vec<NewInvite>,
        max_members: u32,
    ) -> Result<IssueOutcome, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        Self::lock_group(&mut tx, group_id)
            .await
            .map_err(db_err)?;

        let existing: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM invites WHERE group_id = $1")
                .bind(group_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_err)?;
        let existing = existing.0.max(0) as u32;

        if existing as u64 + invites.len() as u64 > max_members as u64 {
            // Whole batch rejected; nothing inserted.
            tx.rollback().await.map_err(db_err)?;
            return Ok(IssueOutcome::CapacityExceeded { existing });
        }

        let mut created = Vec::with_capacity(invites.len());
        for invite in &invites {
            let entity = Self::insert_invite(&mut tx, group_id, invite)
                .await
                .map_err(db_err)?;
            created.push(entity.into());
        }

        tx.commit().await.map_err(db_err)?;
        Ok(IssueOutcome::Created(created))
    }

    async fn rename_invite(
        &self,
        invite_id: Uuid,
        display_name: &str,
    ) -> Result<Option<InviteRecord>, StoreError> {
        let entity = sqlx::query_as::<_, InviteEntity>(
            "UPDATE invites SET display_name = $2 WHERE id = $1
             RETURNING id, group_id, token, display_name, role, used_at, created_at",
        )
        .bind(invite_id)
        .bind(display_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(entity.map(Into::into))
    }

    async fn replace_setup(
        &self,
        group_id: Uuid,
        categories: Vec<NewCategory>,
    ) -> Result<SetupOutcome, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        Self::lock_group(&mut tx, group_id)
            .await
            .map_err(db_err)?;

        let locked: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM ballots WHERE group_id = $1)")
                .bind(group_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_err)?;
        if locked.0 {
            tx.rollback().await.map_err(db_err)?;
            return Ok(SetupOutcome::Locked);
        }

        sqlx::query("DELETE FROM categories WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        let mut nominee_count = 0usize;
        for category in &categories {
            let category_id = Uuid::new_v4();
            sqlx::query(
                "INSERT INTO categories (id, group_id, name, sort_order)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(category_id)
            .bind(group_id)
            .bind(&category.name)
            .bind(category.sort_order as i32)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            for (index, nominee) in category.nominees.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO nominees (id, category_id, name, sort_order)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(Uuid::new_v4())
                .bind(category_id)
                .bind(nominee)
                .bind((index + 1) as i32)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
                nominee_count += 1;
            }
        }

        tx.commit().await.map_err(db_err)?;
        Ok(SetupOutcome::Replaced {
            categories: categories.len(),
            nominees: nominee_count,
        })
    }

    async fn categories_with_nominees(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        let categories = sqlx::query_as::<_, CategoryEntity>(
            "SELECT id, group_id, name, sort_order
             FROM categories WHERE group_id = $1
             ORDER BY sort_order ASC, id ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let nominees = sqlx::query_as::<_, NomineeEntity>(
            "SELECT n.id, n.category_id, n.name, n.sort_order
             FROM nominees n
             JOIN categories c ON c.id = n.category_id
             WHERE c.group_id = $1
             ORDER BY n.sort_order ASC, n.id ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut result = Vec::with_capacity(categories.len());
        for category in categories {
            let own: Vec<_> = nominees
                .iter()
                .filter(|n| n.category_id == category.id)
                .cloned()
                .map(Into::into)
                .collect();
            result.push(category.into_record(own));
        }
        Ok(result)
    }

    async fn has_ballots(&self, group_id: Uuid) -> Result<bool, StoreError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM ballots WHERE group_id = $1)")
                .bind(group_id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(exists.0)
    }

    async fn submit_ballot(
        &self,
        group_id: Uuid,
        invite_id: Uuid,
        votes: Vec<VoteRecord>,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let group = Self::lock_group(&mut tx, group_id)
            .await
            .map_err(db_err)?;
        if group.and_then(|g| g.reveal_at).is_some() {
            tx.rollback().await.map_err(db_err)?;
            return Ok(SubmitOutcome::VotingClosed);
        }

        // Claims the invite; zero rows means another ballot got here first.
        let claimed = sqlx::query(
            "UPDATE invites SET used_at = $3
             WHERE id = $1 AND group_id = $2 AND used_at IS NULL",
        )
        .bind(invite_id)
        .bind(group_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        if claimed.rows_affected() == 0 {
            tx.rollback().await.map_err(db_err)?;
            return Ok(SubmitOutcome::AlreadyVoted);
        }

        let ballot_id = Uuid::new_v4();
        sqlx::query("INSERT INTO ballots (id, group_id, invite_id) VALUES ($1, $2, $3)")
            .bind(ballot_id)
            .bind(group_id)
            .bind(invite_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        for vote in &votes {
            sqlx::query(
                "INSERT INTO votes (ballot_id, category_id, nominee_id) VALUES ($1, $2, $3)",
            )
            .bind(ballot_id)
            .bind(vote.category_id)
            .bind(vote.nominee_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(SubmitOutcome::Committed { ballot_id })
    }

    async fn invite_counts(&self, group_id: Uuid) -> Result<InviteCounts, StoreError> {
        let row: (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(used_at) FROM invites WHERE group_id = $1",
        )
        .bind(group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(InviteCounts {
            total: row.0.max(0) as u32,
            voted: row.1.max(0) as u32,
        })
    }

    async fn reveal(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, StoreError> {
        let row: (DateTime<Utc>,) = sqlx::query_as(
            "UPDATE groups SET reveal_at = COALESCE(reveal_at, $2)
             WHERE id = $1 RETURNING reveal_at",
        )
        .bind(group_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.0)
    }

    async fn votes_for_group(&self, group_id: Uuid) -> Result<Vec<VoteRecord>, StoreError> {
        let rows = sqlx::query_as::<_, VoteRowEntity>(
            "SELECT v.category_id, v.nominee_id
             FROM votes v
             JOIN ballots b ON b.id = v.ballot_id
             WHERE b.group_id = $1",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn voters_for_group(&self, group_id: Uuid) -> Result<Vec<VoterRecord>, StoreError> {
        let rows = sqlx::query_as::<_, VoterEntity>(
            "SELECT i.display_name, (i.used_at IS NOT NULL) AS voted
             FROM invites i
             WHERE i.group_id = $1
             ORDER BY i.created_at ASC, i.id ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
