//! Shared utilities and common types for the Ballotbox backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Invite-token and group-code generation
//! - Common validation logic

pub mod crypto;
pub mod validation;
