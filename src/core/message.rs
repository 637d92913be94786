//! Messages posted to a group.

use crate::core::UserRecord;
use serde::Serialize;
use std::fmt;

/// A message in a group's history.
///
/// Messages are only created by [`Group::post_message`](crate::core::Group::post_message)
/// and never change afterwards. The sender is kept by value, so removing
/// the sender from the group does not affect the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    sender: UserRecord,
    content: String,
    /// Unix timestamp (seconds) when the message was posted.
    timestamp: Option<i64>,
}

impl Message {
    /// Creates a message stamped with the current time.
    pub(crate) fn new(sender: UserRecord, content: String) -> Self {
        Self {
            sender,
            content,
            timestamp: Some(current_timestamp()),
        }
    }

    /// Returns the user who posted the message.
    #[must_use]
    pub const fn sender(&self) -> &UserRecord {
        &self.sender
    }

    /// Returns the message text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the posting time as a Unix timestamp, if recorded.
    #[must_use]
    pub const fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender.name, self.content)
    }
}

/// Returns the current Unix timestamp in seconds.
#[allow(clippy::cast_possible_wrap)]
fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
