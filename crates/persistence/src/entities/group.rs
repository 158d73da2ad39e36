//! Group entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::store::GroupRecord;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the groups table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupEntity {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub max_members: i32,
    pub reveal_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<GroupEntity> for GroupRecord {
    fn from(entity: GroupEntity) -> Self {
        GroupRecord {
            id: entity.id,
            code: entity.code,
            title: entity.title,
            max_members: entity.max_members.max(0) as u32,
            reveal_at: entity.reveal_at,
            created_at: entity.created_at,
        }
    }
}
