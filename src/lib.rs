//! # study-chat
//!
//! Study groups with a terminal chat.
//!
//! study-chat keeps a set of named study groups built from a read-only
//! directory of users. Each group has a member limit and an append-only
//! message history; one group at a time can be selected as the target for
//! new messages.
//!
//! ## Features
//!
//! - **Groups**: Create, delete and select groups with a per-group capacity
//! - **Membership**: Add and remove users looked up by ID in the directory
//! - **Messages**: Members post to the selected group; history is kept in order
//! - **CSV Directory**: Users are loaded from an `id,name,email` file
//!
//! Every group operation returns an [`Outcome`]: a confirmation string or a
//! [`GroupError`] naming exactly what was rejected. A failed operation never
//! changes state.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod controller;
pub mod core;
pub mod directory;
pub mod error;
pub mod logging;
pub mod registry;

// Re-export commonly used types at crate root
pub use error::{Error, FailureKind, GroupError, Outcome, Result};

// Re-export core domain types
pub use core::{DEFAULT_CAPACITY, Group, Message, UserRecord};

// Re-export directory types
pub use directory::{DEFAULT_USERS_PATH, MemoryDirectory, UserDirectory};

// Re-export group management
pub use controller::GroupController;
pub use registry::Registry;

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
