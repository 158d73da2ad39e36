//! Setup domain models.

use serde::{Deserialize, Serialize};

/// Request to select categories from the catalog into a group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApplySetupRequest {
    #[serde(default)]
    pub category_keys: Vec<String>,
}

/// Response after replacing a group's setup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ApplySetupResponse {
    pub inserted: InsertedCounts,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InsertedCounts {
    pub categories: usize,
    pub nominees: usize,
}

/// Current setup: selected catalog keys plus the one-way lock flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GetSetupResponse {
    pub category_keys: Vec<String>,
    /// True iff at least one ballot exists; setup is frozen once true.
    pub has_votes: bool,
}
