//! Domain layer for the Ballotbox backend.
//!
//! This crate contains:
//! - Domain models (groups, invites, setup, ballots, results)
//! - The record-store interface and its record types
//! - The static nominee catalog
//! - Business logic services (ballot validation, tally, reveal gating)
//! - Domain error types

pub mod catalog;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
