//! User directory for study-chat.
//!
//! The directory is the read-only source of [`UserRecord`](crate::core::UserRecord)s
//! the controller resolves user IDs against. Records are loaded once, from
//! a CSV file or directly from memory, and never created by the core.

pub mod loader;
pub mod memory;
pub mod traits;

pub use loader::{load_users_csv, read_users_csv, sample_users, write_sample_csv};
pub use memory::MemoryDirectory;
pub use traits::UserDirectory;

/// Default path of the users CSV file.
pub const DEFAULT_USERS_PATH: &str = "users.csv";
