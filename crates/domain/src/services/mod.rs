//! Business logic services.

pub mod ballot;
pub mod reveal;
pub mod tally;
