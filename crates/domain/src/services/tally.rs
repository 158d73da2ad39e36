//! Vote aggregation into per-category ranked results.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::results::{CategoryResult, NomineeResult};
use crate::store::{CategoryRecord, VoteRecord};

/// Aggregates votes into ranked results.
///
/// Categories keep their persisted sort order. Within a category, nominees
/// are ranked by descending vote count with a stable sort, so ties keep the
/// persisted (catalog) order. Zero-vote nominees appear with count 0.
pub fn compute_results(
    categories: &[CategoryRecord],
    votes: &[VoteRecord],
) -> Vec<CategoryResult> {
    let mut counts: HashMap<Uuid, u32> = HashMap::new();
    for vote in votes {
        *counts.entry(vote.nominee_id).or_insert(0) += 1;
    }

    categories
        .iter()
        .map(|category| {
            let mut nominees: Vec<NomineeResult> = category
                .nominees
                .iter()
                .map(|n| NomineeResult {
                    nominee_id: n.id,
                    nominee_name: n.name.clone(),
                    votes: counts.get(&n.id).copied().unwrap_or(0),
                })
                .collect();
            nominees.sort_by(|a, b| b.votes.cmp(&a.votes));

            CategoryResult {
                category_id: category.id,
                category_name: category.name.clone(),
                nominees,
            }
        })
        .collect()
}
