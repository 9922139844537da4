//! Password digest helpers.
//!
//! # Responsibility
//! - Turn a plaintext password into the hex digest stored for an account.
//!
//! # Invariants
//! - Output is always `DIGEST_HEX_LEN` lowercase hex characters.
//! - Digests are unsalted SHA-256 over the UTF-8 bytes of the input, so the
//!   same plaintext always maps to the same digest.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hashes `plaintext` with SHA-256 and returns the lowercase hex encoding.
///
/// Never fails; the empty string hashes like any other input.
pub fn digest(plaintext: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plaintext.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Returns whether `value` has the shape produced by [`digest`].
pub fn is_digest(value: &str) -> bool {
    value.len() == DIGEST_HEX_LEN
        && value
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
}
