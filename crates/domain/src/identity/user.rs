//! User domain entity.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::auth::password::PasswordHash;
use crate::identity::email::EmailAddress;
use crate::identity::id::UserId;
use crate::identity::username::Username;

/// Represents a registered user within the system domain.
///
/// `id` and `created_at` are assigned by the store at creation and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    /// `None` while the account waits for an external credential linkage.
    pub password_hash: Option<PasswordHash>,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `false` until the account goes through the activation transition.
    pub active: bool,
}

impl User {
    /// Combines `first_name` and `last_name` with a single space.
    ///
    /// Computed on read, never persisted. Absent parts are skipped;
    /// returns `None` when neither part is set.
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_owned()),
            (None, None) => None,
        }
    }

    /// Whether the account holds a usable password.
    #[inline]
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User({})>", self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>) -> User {
        User {
            id: UserId::from(1),
            username: Username::parse("alice").unwrap(),
            email: EmailAddress::parse("alice@x.com").unwrap(),
            password_hash: None,
            created_at: Utc::now(),
            first_name: first.map(str::to_owned),
            last_name: last.map(str::to_owned),
            active: false,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(
            user(Some("Alice"), Some("Smith")).full_name().as_deref(),
            Some("Alice Smith")
        );
        assert_eq!(
            user(Some("Alice"), None).full_name().as_deref(),
            Some("Alice")
        );
        assert_eq!(
            user(None, Some("Smith")).full_name().as_deref(),
            Some("Smith")
        );
        assert_eq!(user(None, None).full_name(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(user(None, None).to_string(), "<User(alice)>");
    }
}
