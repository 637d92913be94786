//! Error types for study-chat operations.
//!
//! Group and registry operations report recoverable failures through
//! [`GroupError`], which every caller is expected to inspect. The remaining
//! error types cover directory loading, file I/O and CLI commands and are
//! gathered under the top-level [`Error`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for study-chat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result of a group or registry mutation.
///
/// `Ok` carries a human-readable confirmation, `Err` the specific failure.
pub type Outcome = std::result::Result<String, GroupError>;

/// Comprehensive error types for study-chat operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Group, membership or messaging failure.
    #[error("group error: {0}")]
    Group(#[from] GroupError),

    /// User directory errors.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Recoverable failures of group, registry and controller operations.
///
/// None of these is fatal; a failed operation leaves every group and the
/// registry exactly as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// A group with this name already exists.
    #[error("a group named '{name}' already exists")]
    DuplicateName {
        /// The conflicting group name.
        name: String,
    },

    /// Group names must contain at least one non-whitespace character.
    #[error("group name must not be empty")]
    InvalidName,

    /// Group capacity must be at least one member.
    #[error("group capacity must be greater than zero")]
    InvalidCapacity,

    /// No group with this name exists.
    #[error("group '{name}' not found")]
    GroupNotFound {
        /// The group name that was looked up.
        name: String,
    },

    /// The directory has no user with this ID.
    #[error("user with ID '{id}' not found")]
    UserNotFound {
        /// The user ID that was looked up.
        id: String,
    },

    /// The user already belongs to the group.
    #[error("user {user} is already a member of group {group}")]
    AlreadyMember {
        /// Name of the user.
        user: String,
        /// Name of the group.
        group: String,
    },

    /// The group is full.
    #[error("group {group} reached its maximum of {max} members")]
    CapacityExceeded {
        /// Name of the group.
        group: String,
        /// Maximum number of members.
        max: usize,
    },

    /// The user does not belong to the group.
    #[error("user {user} is not a member of group {group}")]
    NotMember {
        /// Name of the user.
        user: String,
        /// Name of the group.
        group: String,
    },

    /// Only members may post to a group.
    #[error("only members can post messages to group {group} ({sender} is not a member)")]
    SenderNotMember {
        /// Name of the rejected sender.
        sender: String,
        /// Name of the group.
        group: String,
    },

    /// The operation needs a selected group and none is selected.
    #[error("no group selected")]
    NoGroupSelected,
}

/// Data-free tag identifying a [`GroupError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    /// See [`GroupError::DuplicateName`].
    DuplicateName,
    /// See [`GroupError::InvalidName`].
    InvalidName,
    /// See [`GroupError::InvalidCapacity`].
    InvalidCapacity,
    /// See [`GroupError::GroupNotFound`].
    GroupNotFound,
    /// See [`GroupError::UserNotFound`].
    UserNotFound,
    /// See [`GroupError::AlreadyMember`].
    AlreadyMember,
    /// See [`GroupError::CapacityExceeded`].
    CapacityExceeded,
    /// See [`GroupError::NotMember`].
    NotMember,
    /// See [`GroupError::SenderNotMember`].
    SenderNotMember,
    /// See [`GroupError::NoGroupSelected`].
    NoGroupSelected,
}

impl GroupError {
    /// Returns the failure kind of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::DuplicateName { .. } => FailureKind::DuplicateName,
            Self::InvalidName => FailureKind::InvalidName,
            Self::InvalidCapacity => FailureKind::InvalidCapacity,
            Self::GroupNotFound { .. } => FailureKind::GroupNotFound,
            Self::UserNotFound { .. } => FailureKind::UserNotFound,
            Self::AlreadyMember { .. } => FailureKind::AlreadyMember,
            Self::CapacityExceeded { .. } => FailureKind::CapacityExceeded,
            Self::NotMember { .. } => FailureKind::NotMember,
            Self::SenderNotMember { .. } => FailureKind::SenderNotMember,
            Self::NoGroupSelected => FailureKind::NoGroupSelected,
        }
    }
}

impl FailureKind {
    /// Returns the kind name as used in JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateName => "DuplicateName",
            Self::InvalidName => "InvalidName",
            Self::InvalidCapacity => "InvalidCapacity",
            Self::GroupNotFound => "GroupNotFound",
            Self::UserNotFound => "UserNotFound",
            Self::AlreadyMember => "AlreadyMember",
            Self::CapacityExceeded => "CapacityExceeded",
            Self::NotMember => "NotMember",
            Self::SenderNotMember => "SenderNotMember",
            Self::NoGroupSelected => "NoGroupSelected",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User directory errors.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The users file does not exist yet.
    #[error("users file not found: {path}. Run: study-chat init")]
    NotInitialized {
        /// Path of the missing users file.
        path: String,
    },

    /// A record with this ID is already in the directory.
    #[error("duplicate user ID: {id}")]
    DuplicateId {
        /// The duplicated user ID.
        id: String,
    },

    /// The CSV source could not be parsed.
    #[error("CSV error: {0}")]
    Csv(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Read or write failure on an open stream.
    #[error("I/O error: {0}")]
    Stream(#[source] std::io::Error),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

impl Error {
    /// Returns `true` if this is a write to a closed pipe.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            Self::Io(IoError::Stream(err)) if err.kind() == std::io::ErrorKind::BrokenPipe
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Stream(err))
    }
}

impl From<csv::Error> for DirectoryError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Directory(DirectoryError::from(err))
    }
}
