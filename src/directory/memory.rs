//! In-memory directory implementation.

use crate::core::UserRecord;
use crate::directory::loader::read_users_csv;
use crate::directory::traits::UserDirectory;
use crate::error::{DirectoryError, Result};
use std::path::Path;

/// Directory holding its records in a vector.
///
/// IDs are unique within the directory; [`MemoryDirectory::insert`]
/// rejects duplicates.
///
/// # Examples
///
/// ```
/// use study_chat::core::UserRecord;
/// use study_chat::directory::{MemoryDirectory, UserDirectory};
///
/// let mut dir = MemoryDirectory::new();
/// dir.insert(UserRecord::new("1", "Ana", "ana@example.com")).unwrap();
/// assert!(dir.get_user_by_email("ANA@example.com").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    users: Vec<UserRecord>,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Builds a directory from records.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateId`] if two records share an ID.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = UserRecord>,
    {
        let mut dir = Self::new();
        for record in records {
            dir.insert(record)?;
        }
        Ok(dir)
    }

    /// Loads a directory from a users CSV file.
    ///
    /// See [`read_users_csv`] for the accepted format.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let users = read_users_csv(path)?;
        Ok(Self { users })
    }

    /// Adds a record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateId`] if the ID is already present.
    pub fn insert(&mut self, record: UserRecord) -> Result<()> {
        if self.get_user_by_id(&record.id).is_some() {
            return Err(DirectoryError::DuplicateId { id: record.id }.into());
        }
        self.users.push(record);
        Ok(())
    }
}

impl UserDirectory for MemoryDirectory {
    fn users(&self) -> &[UserRecord] {
        &self.users
    }
}
