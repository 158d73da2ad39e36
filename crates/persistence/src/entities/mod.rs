//! Entity definitions (database row mappings).

mod ballot;
mod category;
mod group;
mod invite;

pub use ballot::{VoteRowEntity, VoterEntity};
pub use category::{CategoryEntity, NomineeEntity};
pub use group::GroupEntity;
pub use invite::{InviteEntity, InviteRoleDb};
