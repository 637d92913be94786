//! Core domain models for study-chat.
//!
//! This module contains the fundamental data structures of the group chat:
//! user records, messages and groups. These are pure domain models with no
//! I/O dependencies.

pub mod group;
pub mod message;
pub mod user;

pub use group::{DEFAULT_CAPACITY, Group};
pub use message::Message;
pub use user::UserRecord;
