//! Credential hashing behind a two-function interface.
//!
//! The rest of the codebase only ever calls `hash_password` and
//! `verify_password`; the digest format is a server-side detail and is never
//! returned to clients.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)?
        .to_string())
}

/// Verifies a plaintext password against a stored digest.
///
/// An unparseable digest verifies as false rather than erroring; a corrupt
/// stored hash must never let a login through.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    PasswordHash::new(digest)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
