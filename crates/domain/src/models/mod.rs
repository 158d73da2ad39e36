//! Domain models: request/response shapes for the API surface.

pub mod ballot;
pub mod group;
pub mod invite;
pub mod results;
pub mod setup;
