//! Password logic.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::{DomainError, Result};

static PASSWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\$([a-z0-9-]{1,32})(?:\$v=(\d+))?(?:\$([^$]+))?\$([^$]+)\$([^$]+)$",
    )
    .unwrap()
});

/// Value object of a plaintext password.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Maximum password length.
    pub const MAX_LENGTH: usize = 255;

    /// Create a new [`Password`] with basic validation.
    ///
    /// Strength validation is a caller concern.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the plaintext is empty or longer than 255 bytes.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::EmptyPassword);
        }

        if value.len() > Self::MAX_LENGTH {
            return Err(DomainError::ValidationFailed {
                field: "password".into(),
                message: format!(
                    "password must be at most {} characters",
                    Self::MAX_LENGTH
                ),
            });
        }

        Ok(Self(value))
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the raw bytes of the plaintext.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// A hashed password as stored in the database.
///
/// Opaque and non-reversible; comparable only through the hasher port.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Converts a [`String`] into a valid [`PasswordHash`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not in PHC format.
    pub fn parse(phc_string: impl Into<String>) -> Result<Self> {
        let pwd = phc_string.into();
        if !PASSWORD_RE.is_match(&pwd) {
            return Err(DomainError::MalformedPasswordHash);
        }

        Ok(Self(pwd))
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHash")
            .field("phc_string", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_bounds() {
        assert!(Password::new("secret1").is_ok());
        assert!(matches!(
            Password::new("").unwrap_err(),
            DomainError::EmptyPassword
        ));
        assert!(Password::new("x".repeat(256)).is_err());
    }

    #[test]
    fn test_hash_must_be_phc() {
        let phc = "$argon2id$v=19$m=65536,t=4,p=2$c2FsdHNhbHQ$aGFzaGhhc2g";
        assert!(PasswordHash::parse(phc).is_ok());

        assert!(PasswordHash::parse("plaintext").is_err());
        assert!(PasswordHash::parse("").is_err());
    }

    #[test]
    fn test_debug_redacts() {
        let password = Password::new("hunter22").unwrap();
        assert!(!format!("{password:?}").contains("hunter22"));
    }
}
