//! Study groups: bounded membership plus an append-only message history.

use crate::core::{Message, UserRecord};
use crate::error::{GroupError, Outcome};
use serde::Serialize;
use std::fmt;

/// Default maximum number of members in a group.
pub const DEFAULT_CAPACITY: usize = 10;

/// A named study group.
///
/// The group enforces its own invariants: the member count never exceeds
/// `max_capacity`, a user appears at most once, and only current members
/// can post. The message history is append-only.
///
/// # Examples
///
/// ```
/// use study_chat::core::{Group, UserRecord};
///
/// let mut group = Group::new("Calc1", 2).unwrap();
/// let ana = UserRecord::new("1", "Ana", "ana@example.com");
///
/// assert!(group.add_member(ana.clone()).is_ok());
/// assert!(group.post_message(&ana, "hello").is_ok());
/// assert_eq!(group.messages().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    name: String,
    max_capacity: usize,
    members: Vec<UserRecord>,
    messages: Vec<Message>,
}

impl Group {
    /// Creates an empty group.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::InvalidCapacity`] if `max_capacity` is zero.
    pub fn new(name: impl Into<String>, max_capacity: usize) -> Result<Self, GroupError> {
        if max_capacity == 0 {
            return Err(GroupError::InvalidCapacity);
        }

        Ok(Self {
            name: name.into(),
            max_capacity,
            members: Vec::new(),
            messages: Vec::new(),
        })
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the maximum number of members.
    #[must_use]
    pub const fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Adds a user as the newest member.
    ///
    /// # Errors
    ///
    /// [`GroupError::AlreadyMember`] if the user is already in the group,
    /// [`GroupError::CapacityExceeded`] if the group is full.
    pub fn add_member(&mut self, user: UserRecord) -> Outcome {
        if self.is_member(&user) {
            return Err(GroupError::AlreadyMember {
                user: user.name,
                group: self.name.clone(),
            });
        }

        if self.is_full() {
            return Err(GroupError::CapacityExceeded {
                group: self.name.clone(),
                max: self.max_capacity,
            });
        }

        let confirmation = format!("User {} added to group {}", user.name, self.name);
        self.members.push(user);
        Ok(confirmation)
    }

    /// Removes a member, keeping the order of the others.
    ///
    /// Messages previously posted by the user stay in the history.
    ///
    /// # Errors
    ///
    /// [`GroupError::NotMember`] if the user is not in the group.
    pub fn remove_member(&mut self, user: &UserRecord) -> Outcome {
        let Some(pos) = self.members.iter().position(|m| m == user) else {
            return Err(GroupError::NotMember {
                user: user.name.clone(),
                group: self.name.clone(),
            });
        };

        let removed = self.members.remove(pos);
        Ok(format!(
            "User {} removed from group {}",
            removed.name, self.name
        ))
    }

    /// Appends a message from `sender` to the history.
    ///
    /// # Errors
    ///
    /// [`GroupError::SenderNotMember`] if `sender` is not a member.
    pub fn post_message(&mut self, sender: &UserRecord, content: impl Into<String>) -> Outcome {
        if !self.is_member(sender) {
            return Err(GroupError::SenderNotMember {
                sender: sender.name.clone(),
                group: self.name.clone(),
            });
        }

        self.messages
            .push(Message::new(sender.clone(), content.into()));
        Ok("Message sent".to_string())
    }

    /// Returns the members in the order they joined.
    #[must_use]
    pub fn members(&self) -> &[UserRecord] {
        &self.members
    }

    /// Returns the message history, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns `true` if the user is a member.
    #[must_use]
    pub fn is_member(&self, user: &UserRecord) -> bool {
        self.members.contains(user)
    }

    /// Returns the number of members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the group has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if no more members can join.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.members.len() >= self.max_capacity
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group: {} ({} members)", self.name, self.members.len())
    }
}
