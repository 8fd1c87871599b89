//! Interfaces for cryptographic operations.

use domain::auth::password::{Password, PasswordHash};

use crate::error::Result;

/// Port for password hashing operations.
///
/// Implementations are stateless and safe to call concurrently.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password with a fresh random salt.
    ///
    /// Two calls on the same plaintext produce different encodings that
    /// both verify against it.
    fn hash(&self, password: &Password) -> Result<PasswordHash>;

    /// Verify a candidate password against a stored hash.
    ///
    /// Comparison runs in time independent of where a mismatch occurs.
    /// Returns `false` on mismatch or on a hash the implementation cannot
    /// read; never errors.
    fn verify(&self, candidate: &Password, hash: &PasswordHash) -> bool;
}
