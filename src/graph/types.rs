//! Core type definitions for the referral network

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a user (referrer or candidate)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id() {
        let id = UserId::new("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{}", id), "alice");

        let id2: UserId = "bob".into();
        assert_eq!(id2.as_str(), "bob");

        let id3: UserId = String::from("carol").into();
        assert_eq!(id3.as_str(), "carol");
    }

    #[test]
    fn test_user_id_ordering() {
        let a = UserId::new("alice");
        let b = UserId::new("bob");
        assert!(a < b);
        assert_eq!(a, UserId::new("alice"));
    }
}
