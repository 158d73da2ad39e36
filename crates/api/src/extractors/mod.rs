//! Request extractors for the two token kinds.
//!
//! Both tokens travel as query parameters so they never show up in route
//! path segments: `k` carries the host key, `t` the invite token.

mod host_token;
mod invite_token;

pub use host_token::HostToken;
pub use invite_token::InviteToken;
