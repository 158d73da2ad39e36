//! Token and code generation for groups and invites.

use rand::RngCore;

/// Alphabet for public group codes. Avoiding confusing chars: 0, O, I, 1.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of a public group code.
pub const GROUP_CODE_LEN: usize = 6;

/// Number of random bytes in an invite token (256 bits of entropy).
const TOKEN_BYTES: usize = 32;

/// Generates a short, human-typeable group code.
///
/// Codes are collision-tolerant, not collision-free: callers that need
/// uniqueness must check against the store and retry.
pub fn generate_group_code() -> String {
    let mut bytes = [0u8; GROUP_CODE_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| CODE_ALPHABET[*b as usize % CODE_ALPHABET.len()] as char)
        .collect()
}

/// Generates an unguessable invite token: 32 random bytes hex-encoded.
pub fn generate_invite_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
