//! Role domain entity.

use std::fmt;

use crate::error::{DomainError, Result};
use crate::identity::id::{RoleId, UserId};

/// A named role, optionally attached to a single user.
#[derive(Clone, Debug, PartialEq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
    pub user_id: Option<UserId>,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Role({})>", self.name)
    }
}

/// Value object of a valid role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    /// Maximum role name length, in bytes.
    pub const MAX_LENGTH: usize = 80;

    /// Converts a [`String`] into a valid [`RoleName`].
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty or longer than 80 bytes.
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() || name.len() > Self::MAX_LENGTH {
            return Err(DomainError::InvalidRoleName);
        }

        Ok(Self(name))
    }

    /// Returns the same string as a string slice `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
