//! Email logic management.

use std::fmt;

use crate::error::{DomainError, Result};

/// Value object of a valid email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Maximum email length, in bytes.
    pub const MAX_LENGTH: usize = 254;

    /// Converts a [`String`] into a valid [`EmailAddress`].
    ///
    /// The address is normalized to lowercase so that uniqueness and
    /// lookups are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty, longer than 254 bytes, or
    /// does not contain exactly one `@`.
    pub fn parse(email: impl Into<String>) -> Result<Self> {
        let email = email.into();

        if email.is_empty() || email.len() > Self::MAX_LENGTH {
            return Err(DomainError::InvalidEmailFormat);
        }

        if email.contains('@') && email.split('@').count() == 2 {
            Ok(Self(email.to_lowercase()))
        } else {
            Err(DomainError::InvalidEmailFormat)
        }
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let email = EmailAddress::parse("Alice@Example.com").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(EmailAddress::parse("").is_err());
        assert!(EmailAddress::parse("no-at-sign").is_err());
        assert!(EmailAddress::parse("two@@signs").is_err());
        assert!(
            EmailAddress::parse(format!("{}@x.com", "a".repeat(250))).is_err()
        );
    }
}
