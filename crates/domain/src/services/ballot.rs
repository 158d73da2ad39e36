//! Ballot validation.
//!
//! A ballot must cover every category the group has at submission time,
//! exactly once each, and every vote's nominee must belong to its stated
//! category. Checks run in a fixed order so clients get stable reasons.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::error::DomainError;
use crate::models::ballot::VoteItem;
use crate::store::CategoryRecord;

/// Validates a submitted ballot against the group's current category set.
///
/// Order of checks: not-configured, completeness, category membership,
/// duplicates, nominee membership.
pub fn validate_ballot(
    votes: &[VoteItem],
    categories: &[CategoryRecord],
) -> Result<(), DomainError> {
    if categories.is_empty() {
        return Err(DomainError::NotConfigured);
    }

    if votes.len() != categories.len() {
        return Err(DomainError::IncompleteBallot {
            expected: categories.len(),
            got: votes.len(),
        });
    }

    let category_ids: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();
    let mut seen: HashSet<Uuid> = HashSet::with_capacity(votes.len());
    for vote in votes {
        if !category_ids.contains(&vote.category_id) {
            return Err(DomainError::InvalidCategory);
        }
        if !seen.insert(vote.category_id) {
            return Err(DomainError::DuplicateCategoryVote);
        }
    }

    let nominee_to_category: HashMap<Uuid, Uuid> = categories
        .iter()
        .flat_map(|c| c.nominees.iter().map(move |n| (n.id, c.id)))
        .collect();
    for vote in votes {
        match nominee_to_category.get(&vote.nominee_id) {
            Some(category_id) if *category_id == vote.category_id => {}
            _ => return Err(DomainError::InvalidNominee),
        }
    }

    Ok(())
}
