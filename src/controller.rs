//! Group controller.
//!
//! Mediates every operation between the user directory and the registry:
//! user IDs are resolved through the directory, group names through the
//! registry, and the mutation itself is delegated to the [`Group`]. Every
//! operation either fully succeeds or leaves all state untouched.

use crate::core::{DEFAULT_CAPACITY, Group, Message, UserRecord};
use crate::directory::UserDirectory;
use crate::error::{GroupError, Outcome};
use crate::registry::Registry;
use tracing::{debug, warn};

/// Entry point for all group, membership and messaging operations.
///
/// The directory and registry are injected at construction, so tests can
/// supply any [`UserDirectory`] and a pre-populated [`Registry`].
///
/// # Examples
///
/// ```
/// use study_chat::controller::GroupController;
/// use study_chat::core::UserRecord;
/// use study_chat::directory::MemoryDirectory;
/// use study_chat::registry::Registry;
///
/// let directory = MemoryDirectory::from_records([
///     UserRecord::new("1", "Ana", "ana@example.com"),
/// ])
/// .unwrap();
/// let mut controller = GroupController::new(directory, Registry::new());
///
/// controller.create_group("Calc1", None).unwrap();
/// controller.add_user_to_group("Calc1", "1").unwrap();
/// controller.select_group("Calc1").unwrap();
/// controller.send_message("1", "hello").unwrap();
///
/// assert_eq!(controller.group_messages(None).unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct GroupController<D> {
    directory: D,
    registry: Registry,
    default_capacity: usize,
}

impl<D: UserDirectory> GroupController<D> {
    /// Creates a controller over the given directory and registry.
    #[must_use]
    pub const fn new(directory: D, registry: Registry) -> Self {
        Self {
            directory,
            registry,
            default_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Sets the capacity used when `create_group` gets no explicit one.
    #[must_use]
    pub fn with_default_capacity(mut self, capacity: usize) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Returns the capacity used for groups created without one.
    #[must_use]
    pub const fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    /// Returns the user directory.
    pub const fn directory(&self) -> &D {
        &self.directory
    }

    /// Returns the registry.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    // ==================== Group Lifecycle ====================

    /// Creates a group, using the default capacity when `capacity` is `None`.
    pub fn create_group(&mut self, name: &str, capacity: Option<usize>) -> Outcome {
        self.registry
            .create_group(name, capacity.unwrap_or(self.default_capacity))
    }

    /// Deletes a group, clearing the selection if it was selected.
    pub fn delete_group(&mut self, name: &str) -> Outcome {
        self.registry.delete_group(name)
    }

    /// Selects a group for messaging.
    pub fn select_group(&mut self, name: &str) -> Outcome {
        self.registry.select_group(name)
    }

    /// Returns the selected group, if any.
    pub fn selected_group(&self) -> Option<&Group> {
        self.registry.selected()
    }

    /// Looks up a group by name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.registry.group(name)
    }

    /// Returns all groups in creation order.
    pub fn groups(&self) -> &[Group] {
        self.registry.groups()
    }

    // ==================== Membership ====================

    /// Adds the user with `user_id` to the named group.
    ///
    /// # Errors
    ///
    /// [`GroupError::GroupNotFound`], [`GroupError::UserNotFound`], or the
    /// group's own [`Group::add_member`] failure.
    pub fn add_user_to_group(&mut self, name: &str, user_id: &str) -> Outcome {
        let group = self.registry.group_mut(name).ok_or_else(|| group_not_found(name))?;
        let user = self
            .directory
            .get_user_by_id(user_id)
            .ok_or_else(|| user_not_found(user_id))?;

        let outcome = group.add_member(user.clone());
        if outcome.is_ok() {
            debug!(group = name, user = user_id, "added member");
        }
        outcome
    }

    /// Removes the user with `user_id` from the named group.
    ///
    /// # Errors
    ///
    /// [`GroupError::GroupNotFound`], [`GroupError::UserNotFound`], or
    /// [`GroupError::NotMember`].
    pub fn remove_user_from_group(&mut self, name: &str, user_id: &str) -> Outcome {
        let group = self.registry.group_mut(name).ok_or_else(|| group_not_found(name))?;
        let user = self
            .directory
            .get_user_by_id(user_id)
            .ok_or_else(|| user_not_found(user_id))?;

        let outcome = group.remove_member(user);
        if outcome.is_ok() {
            debug!(group = name, user = user_id, "removed member");
        }
        outcome
    }

    /// Checks whether a user belongs to the named group, or to the
    /// selected group when `name` is `None`.
    ///
    /// # Errors
    ///
    /// [`GroupError::GroupNotFound`] or [`GroupError::NoGroupSelected`]
    /// when the target group cannot be resolved, then
    /// [`GroupError::UserNotFound`].
    pub fn is_member(&self, user_id: &str, name: Option<&str>) -> Result<bool, GroupError> {
        let group = self.target_group(name)?;
        let user = self
            .directory
            .get_user_by_id(user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        Ok(group.is_member(user))
    }

    /// Returns the members of the named group, or of the selected group.
    ///
    /// # Errors
    ///
    /// [`GroupError::GroupNotFound`] or [`GroupError::NoGroupSelected`].
    pub fn group_members(&self, name: Option<&str>) -> Result<&[UserRecord], GroupError> {
        self.target_group(name).map(Group::members)
    }

    // ==================== Messaging ====================

    /// Posts a message from `user_id` to the selected group.
    ///
    /// Rejected posts from non-members are logged at `warn` level.
    ///
    /// # Errors
    ///
    /// [`GroupError::NoGroupSelected`], [`GroupError::UserNotFound`], or
    /// [`GroupError::SenderNotMember`].
    pub fn send_message(&mut self, user_id: &str, content: &str) -> Outcome {
        let group = self
            .registry
            .selected_mut()
            .ok_or(GroupError::NoGroupSelected)?;
        let user = self
            .directory
            .get_user_by_id(user_id)
            .ok_or_else(|| user_not_found(user_id))?;

        let outcome = group.post_message(user, content);
        match &outcome {
            Ok(_) => debug!(group = group.name(), user = user_id, "posted message"),
            Err(err) => warn!(group = group.name(), user = user_id, %err, "rejected message"),
        }
        outcome
    }

    /// Returns the history of the named group, or of the selected group.
    ///
    /// # Errors
    ///
    /// [`GroupError::GroupNotFound`] or [`GroupError::NoGroupSelected`].
    pub fn group_messages(&self, name: Option<&str>) -> Result<&[Message], GroupError> {
        self.target_group(name).map(Group::messages)
    }

    /// Resolves `name` to a group, falling back to the selection.
    fn target_group(&self, name: Option<&str>) -> Result<&Group, GroupError> {
        match name {
            Some(name) => self.registry.group(name).ok_or_else(|| group_not_found(name)),
            None => self.registry.selected().ok_or(GroupError::NoGroupSelected),
        }
    }
}

fn group_not_found(name: &str) -> GroupError {
    GroupError::GroupNotFound {
        name: name.to_string(),
    }
}

fn user_not_found(id: &str) -> GroupError {
    GroupError::UserNotFound { id: id.to_string() }
}
