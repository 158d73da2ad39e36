//! Invite entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::store::{InviteRecord, InviteRole};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the invite_role type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invite_role", rename_all = "lowercase")]
pub enum InviteRoleDb {
    Host,
    Guest,
}

impl From<InviteRole> for InviteRoleDb {
    fn from(role: InviteRole) -> Self {
        match role {
            InviteRole::Host => InviteRoleDb::Host,
            InviteRole::Guest => InviteRoleDb::Guest,
        }
    }
}

impl From<InviteRoleDb> for InviteRole {
    fn from(role: InviteRoleDb) -> Self {
        match role {
            InviteRoleDb::Host => InviteRole::Host,
            InviteRoleDb::Guest => InviteRole::Guest,
        }
    }
}

/// Database row mapping for the invites table.
#[derive(Debug, Clone, FromRow)]
pub struct InviteEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub token: String,
    pub display_name: String,
    pub role: InviteRoleDb,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<InviteEntity> for InviteRecord {
    fn from(entity: InviteEntity) -> Self {
        InviteRecord {
            id: entity.id,
            group_id: entity.group_id,
            token: entity.token,
            display_name: entity.display_name,
            role: entity.role.into(),
            used_at: entity.used_at,
            created_at: entity.created_at,
        }
    }
}
