//! Vote and voter entities (database row mappings).

use domain::store::{VoteRecord, VoterRecord};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the votes table.
#[derive(Debug, Clone, FromRow)]
pub struct VoteRowEntity {
    pub category_id: Uuid,
    pub nominee_id: Uuid,
}

impl From<VoteRowEntity> for VoteRecord {
    fn from(entity: VoteRowEntity) -> Self {
        VoteRecord {
            category_id: entity.category_id,
            nominee_id: entity.nominee_id,
        }
    }
}

/// Projection of an invite with its voting state, for participation lists.
#[derive(Debug, Clone, FromRow)]
pub struct VoterEntity {
    pub display_name: String,
    pub voted: bool,
}

impl From<VoterEntity> for VoterRecord {
    fn from(entity: VoterEntity) -> Self {
        VoterRecord {
            display_name: entity.display_name,
            voted: entity.voted,
        }
    }
}
