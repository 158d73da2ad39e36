//! Persistence layer for the Ballotbox backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - The PostgreSQL record store (production)
//! - The in-memory record store (tests, local development)

pub mod db;
pub mod entities;
pub mod memory;
pub mod postgres;
