//! Visitor fingerprinting for share clicks.

use sha2::{Digest, Sha256};

const HASH_PREFIX_LEN: usize = 16;

/// Hex prefix of the SHA-256 digest of `input`.
pub fn hash_value(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex.truncate(HASH_PREFIX_LEN);
    hex
}

/// Stable visitor id for an address and user agent pair.
pub fn visitor_id(ip_address: &str, user_agent: &str) -> String {
    hash_value(&format!("{ip_address}_{user_agent}"))
}
