//! Category and nominee entities (database row mappings).

use domain::store::{CategoryRecord, NomineeRecord};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the categories table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

impl CategoryEntity {
    /// Combines a category row with its nominee rows into a domain record.
    pub fn into_record(self, nominees: Vec<NomineeRecord>) -> CategoryRecord {
        CategoryRecord {
            id: self.id,
            name: self.name,
            sort_order: self.sort_order.max(0) as u32,
            nominees,
        }
    }
}

/// Database row mapping for the nominees table.
#[derive(Debug, Clone, FromRow)]
pub struct NomineeEntity {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub sort_order: i32,
}

impl From<NomineeEntity> for NomineeRecord {
    fn from(entity: NomineeEntity) -> Self {
        NomineeRecord {
            id: entity.id,
            name: entity.name,
            sort_order: entity.sort_order.max(0) as u32,
        }
    }
}
