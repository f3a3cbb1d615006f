//! Record Fingerprinting
//!
//! Deterministic 31-multiplier rolling hash over the JSON serialization of a
//! record. The digest is a tamper indicator only: it is NOT a cryptographic
//! hash and collisions are expected.

use serde::Serialize;

use crate::error::AuditError;

/// Width of the hex body of a digest, excluding the `0x` prefix
pub const DIGEST_HEX_WIDTH: usize = 64;

/// Fold a string into the rolling 32-bit accumulator.
///
/// Works over UTF-16 code units so non-ASCII text digests the same way a
/// browser-side client computes it.
pub fn rolling_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Render an accumulator as a `0x`-prefixed, zero-padded digest string
pub fn render_digest(hash: i32) -> String {
    format!("0x{:0width$x}", hash.unsigned_abs(), width = DIGEST_HEX_WIDTH)
}

/// Fingerprint an already-serialized string
pub fn fingerprint_str(input: &str) -> String {
    render_digest(rolling_hash(input))
}

/// Fingerprint any serializable value via its canonical JSON form
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String, AuditError> {
    let canonical = serde_json::to_string(value)?;
    Ok(fingerprint_str(&canonical))
}

/// Check that a string has the shape of a digest produced by this module
pub fn is_digest(candidate: &str) -> bool {
    candidate
        .strip_prefix("0x")
        .map(|body| {
            body.len() == DIGEST_HEX_WIDTH
                && body.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        })
        .unwrap_or(false)
}
