//! ID logic management.

use std::fmt;

/// Value object of a user identifier.
///
/// Identifiers are assigned by the store at creation and never change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Converts untrusted textual input into a [`UserId`].
    ///
    /// Only unsigned decimal digit strings are accepted; anything else
    /// (empty input, signs, whitespace, values past `i64::MAX`) yields
    /// `None`. Callers treat `None` as an absent record, so a garbage
    /// identifier behaves like a lookup miss instead of an error.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        raw.parse::<i64>().ok().map(Self)
    }

    /// Returns the numeric form of the identifier.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value object of a role identifier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(i64);

impl RoleId {
    /// Returns the numeric form of the identifier.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RoleId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits() {
        assert_eq!(UserId::parse("42"), Some(UserId::from(42)));
        assert_eq!(UserId::parse("1"), Some(UserId::from(1)));
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert_eq!(UserId::parse("not-a-number"), None);
        assert_eq!(UserId::parse(""), None);
        assert_eq!(UserId::parse("-5"), None);
        assert_eq!(UserId::parse(" 7"), None);
        assert_eq!(UserId::parse("3.5"), None);
    }

    #[test]
    fn test_parse_rejects_overflow() {
        // All digits, but past i64::MAX.
        assert_eq!(UserId::parse("99999999999999999999999"), None);
    }
}
