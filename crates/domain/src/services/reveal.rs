//! Reveal gating policy.
//!
//! Results unlock once at least half the group's capacity has voted,
//! rounding up. The threshold counts capacity, not issued invites: guests
//! who never open their link still weigh against the gate. That is a
//! product decision, including the rounding direction.

use chrono::{DateTime, Utc};

/// Ballots required before the host may reveal: ceil(max_members / 2).
pub fn reveal_threshold(max_members: u32) -> u32 {
    max_members.div_ceil(2)
}

/// Whether the host may reveal now.
///
/// True iff results are still hidden, the group has positive capacity, and
/// the voted count has reached the threshold.
pub fn can_reveal(reveal_at: Option<DateTime<Utc>>, max_members: u32, voted: u32) -> bool {
    reveal_at.is_none() && max_members > 0 && voted >= reveal_threshold(max_members)
}
