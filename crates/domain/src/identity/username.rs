//! Username logic management.

use std::fmt;

use crate::error::{DomainError, Result};

/// Value object of a valid username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Maximum username length, in bytes.
    pub const MAX_LENGTH: usize = 80;

    /// Converts a [`String`] into a valid [`Username`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty or longer than 80 bytes.
    pub fn parse(username: impl Into<String>) -> Result<Self> {
        let username = username.into();

        if username.is_empty() || username.len() > Self::MAX_LENGTH {
            return Err(DomainError::InvalidUsername);
        }

        Ok(Self(username))
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
