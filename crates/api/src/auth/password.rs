//! bcrypt password hashing and verification.
//!
//! Admin rows created before hashing was introduced may still hold the
//! password in plaintext. [`check_password`] accepts those once and reports
//! [`PasswordCheck::LegacyPlaintext`] so the caller can store a hash in its
//! place.

use std::sync::OnceLock;

use sha2::{Digest, Sha256};

/// bcrypt work factor for newly stored hashes.
pub const BCRYPT_COST: u32 = 10;

/// Outcome of comparing a candidate password with the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    /// Matched a bcrypt hash.
    Hashed,
    /// Matched a stored plaintext value; the row should be rehashed.
    LegacyPlaintext,
    /// Did not match.
    Mismatch,
}

impl PasswordCheck {
    pub fn is_valid(self) -> bool {
        !matches!(self, PasswordCheck::Mismatch)
    }
}

/// Whether a stored password value is a bcrypt hash (`$2a$`, `$2b$`, `$2y$`).
pub fn is_bcrypt_hash(stored: &str) -> bool {
    stored.starts_with("$2")
}

/// Hash a plaintext password with bcrypt at [`BCRYPT_COST`].
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Compare `candidate` against the stored password value.
pub fn check_password(candidate: &str, stored: &str) -> Result<PasswordCheck, bcrypt::BcryptError> {
    if is_bcrypt_hash(stored) {
        return Ok(if bcrypt::verify(candidate, stored)? {
            PasswordCheck::Hashed
        } else {
            PasswordCheck::Mismatch
        });
    }

    if digests_equal(candidate, stored) {
        Ok(PasswordCheck::LegacyPlaintext)
    } else {
        Ok(PasswordCheck::Mismatch)
    }
}

/// Run one bcrypt verification against a throwaway hash and return `false`.
///
/// Used when no admin matches the submitted username, so that path costs the
/// same as a wrong password.
pub fn verify_against_dummy(candidate: &str) -> bool {
    if let Some(hash) = dummy_hash() {
        let _ = bcrypt::verify(candidate, hash);
    }
    false
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
    DUMMY_HASH
        .get_or_init(|| hash_password("imi-no-such-admin").ok())
        .as_deref()
}

/// Compare two strings through their SHA-256 digests so the comparison time
/// does not depend on the length of the common prefix.
fn digests_equal(a: &str, b: &str) -> bool {
    let da = Sha256::digest(a.as_bytes());
    let db = Sha256::digest(b.as_bytes());
    da.iter().zip(db.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
