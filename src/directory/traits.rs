//! Directory trait definition.
//!
//! Defines the lookup interface the controller depends on, so the
//! directory can be swapped out in tests or by other front ends.

use crate::core::UserRecord;

/// Read-only lookup of user records.
///
/// Name and email lookups are case-insensitive; ID lookups are exact.
pub trait UserDirectory {
    /// Returns all records in load order.
    fn users(&self) -> &[UserRecord];

    /// Looks up a user by ID.
    fn get_user_by_id(&self, id: &str) -> Option<&UserRecord> {
        self.users().iter().find(|u| u.id == id)
    }

    /// Returns every user whose name matches, ignoring case.
    ///
    /// Names are not unique, so this may return several records.
    fn get_users_by_name(&self, name: &str) -> Vec<&UserRecord> {
        let needle = name.to_lowercase();
        self.users()
            .iter()
            .filter(|u| u.name.to_lowercase() == needle)
            .collect()
    }

    /// Looks up a user by email, ignoring case.
    fn get_user_by_email(&self, email: &str) -> Option<&UserRecord> {
        let needle = email.to_lowercase();
        self.users()
            .iter()
            .find(|u| u.email.to_lowercase() == needle)
    }

    /// Returns the number of records.
    fn len(&self) -> usize {
        self.users().len()
    }

    /// Returns `true` if the directory has no records.
    fn is_empty(&self) -> bool {
        self.users().is_empty()
    }
}
