//! User records served by the directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A user known to the directory.
///
/// Two records are equal when their IDs are equal, regardless of name or
/// email.
///
/// # Examples
///
/// ```
/// use study_chat::core::UserRecord;
///
/// let a = UserRecord::new("1", "Ana Souza", "ana@example.com");
/// let b = UserRecord::new("1", "Ana S.", "ana.s@example.com");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "Ana Souza (ana@example.com)");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,
}

impl UserRecord {
    /// Creates a new user record.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl PartialEq for UserRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UserRecord {}

impl Hash for UserRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_id_only() {
        let a = UserRecord::new("1", "Ana", "ana@example.com");
        let b = UserRecord::new("1", "Other", "other@example.com");
        let c = UserRecord::new("2", "Ana", "ana@example.com");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_follows_id() {
        let mut set = HashSet::new();
        set.insert(UserRecord::new("1", "Ana", "ana@example.com"));
        set.insert(UserRecord::new("1", "Ana Souza", "souza@example.com"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display() {
        let user = UserRecord::new("3", "Pedro Oliveira", "pedro@example.com");
        assert_eq!(user.to_string(), "Pedro Oliveira (pedro@example.com)");
    }
}
