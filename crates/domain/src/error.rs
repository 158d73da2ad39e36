//! Domain error taxonomy.
//!
//! Every failure a component can produce maps to exactly one variant here;
//! the API layer translates variants into HTTP status codes and
//! machine-stable reason strings. All business-rule checks run before any
//! mutating write, so a validation failure never leaves partial state.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad or missing input, user-correctable.
    #[error("{0}")]
    Validation(String),

    /// Token missing or not resolvable to an invite in the claimed group.
    #[error("{0}")]
    Unauthorized(String),

    /// Token valid but the target belongs to a different group.
    #[error("{0}")]
    Forbidden(String),

    /// Missing entity.
    #[error("{0}")]
    NotFound(String),

    /// Issuing the requested invites would exceed the group capacity.
    #[error("Exceeds max members ({existing} existing + {requested} requested > {max_members})")]
    CapacityExceeded {
        existing: u32,
        requested: u32,
        max_members: u32,
    },

    /// Setup cannot change once any ballot exists.
    #[error("Cannot change setup after votes have been cast")]
    SetupLocked,

    /// The invite already cast its ballot.
    #[error("Already voted")]
    AlreadyVoted,

    /// Results are revealed; the ballot set is frozen.
    #[error("Voting is closed (results have been revealed)")]
    VotingClosed,

    /// The group has no categories yet.
    #[error("Voting not set up yet")]
    NotConfigured,

    /// The ballot does not cover every category exactly once.
    #[error("Incomplete ballot: expected {expected} votes, got {got}")]
    IncompleteBallot { expected: usize, got: usize },

    /// A vote names a category outside the group.
    #[error("Invalid category")]
    InvalidCategory,

    /// Two votes name the same category.
    #[error("Duplicate category vote")]
    DuplicateCategoryVote,

    /// A vote names a nominee outside its stated category.
    #[error("Invalid nominee for category")]
    InvalidNominee,

    /// The participation threshold has not been met.
    #[error("Cannot reveal yet: {voted} of {threshold} required ballots cast")]
    RevealNotReady { threshold: u32, voted: u32 },

    /// Results are still hidden.
    #[error("Not revealed yet")]
    NotRevealedYet,

    /// Backing-store failure. Fatal to the request, never retried here.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    match &e.message {
                        Some(m) => m.to_string(),
                        None => format!("{} is invalid", field),
                    }
                })
            })
            .collect();
        messages.sort();
        DomainError::Validation(messages.join(", "))
    }
}
