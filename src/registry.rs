//! Group registry.
//!
//! Owns every [`Group`] keyed by name, in creation order, together with the
//! current selection. The selection is stored as a group name and checked
//! against the map whenever it is read, so it can never point at a deleted
//! group.

use crate::core::Group;
use crate::error::{GroupError, Outcome};
use tracing::info;

/// Collection of groups plus the selected group.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    groups: Vec<Group>,
    selected: Option<String>,
}

impl Registry {
    /// Creates an empty registry with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: Vec::new(),
            selected: None,
        }
    }

    /// Creates a new empty group.
    ///
    /// # Errors
    ///
    /// [`GroupError::DuplicateName`] if the name is taken,
    /// [`GroupError::InvalidName`] if it is empty or whitespace,
    /// [`GroupError::InvalidCapacity`] if `capacity` is zero.
    pub fn create_group(&mut self, name: &str, capacity: usize) -> Outcome {
        if self.position(name).is_some() {
            return Err(GroupError::DuplicateName {
                name: name.to_string(),
            });
        }

        if name.trim().is_empty() {
            return Err(GroupError::InvalidName);
        }

        let group = Group::new(name, capacity)?;
        self.groups.push(group);
        info!(group = name, capacity, "created group");
        Ok(format!("Group '{name}' created"))
    }

    /// Deletes a group and clears the selection if it pointed there.
    ///
    /// # Errors
    ///
    /// [`GroupError::GroupNotFound`] if no such group exists.
    pub fn delete_group(&mut self, name: &str) -> Outcome {
        let pos = self.position(name).ok_or_else(|| not_found(name))?;

        self.groups.remove(pos);
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }

        info!(group = name, "deleted group");
        Ok(format!("Group '{name}' deleted"))
    }

    /// Makes `name` the selected group, replacing any prior selection.
    ///
    /// # Errors
    ///
    /// [`GroupError::GroupNotFound`] if no such group exists.
    pub fn select_group(&mut self, name: &str) -> Outcome {
        if self.position(name).is_none() {
            return Err(not_found(name));
        }

        self.selected = Some(name.to_string());
        Ok(format!("Group '{name}' selected"))
    }

    /// Returns the selected group, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Group> {
        self.selected.as_deref().and_then(|name| self.group(name))
    }

    /// Returns the selected group mutably, if any.
    pub fn selected_mut(&mut self) -> Option<&mut Group> {
        let name = self.selected.clone()?;
        self.group_mut(&name)
    }

    /// Looks up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Looks up a group by name, mutably.
    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name() == name)
    }

    /// Returns all groups in creation order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns the number of groups.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name() == name)
    }
}

fn not_found(name: &str) -> GroupError {
    GroupError::GroupNotFound {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_create_group() {
        let mut registry = Registry::new();
        let msg = registry.create_group("Calc1", 10).unwrap();
        assert_eq!(msg, "Group 'Calc1' created");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.group("Calc1").unwrap().max_capacity(), 10);
    }

    #[test]
    fn test_create_duplicate() {
        let mut registry = Registry::new();
        registry.create_group("Calc1", 10).unwrap();
        let err = registry.create_group("Calc1", 3).unwrap_err();
        assert_eq!(err.kind(), FailureKind::DuplicateName);
        assert_eq!(registry.group("Calc1").unwrap().max_capacity(), 10);
    }

    #[test]
    fn test_create_blank_names() {
        let mut registry = Registry::new();
        assert_eq!(
            registry.create_group("", 10).unwrap_err(),
            GroupError::InvalidName
        );
        assert_eq!(
            registry.create_group("   ", 10).unwrap_err(),
            GroupError::InvalidName
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_create_zero_capacity() {
        let mut registry = Registry::new();
        let err = registry.create_group("Calc1", 0).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidCapacity);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_groups_keep_creation_order() {
        let mut registry = Registry::new();
        registry.create_group("B", 10).unwrap();
        registry.create_group("A", 10).unwrap();
        registry.create_group("C", 10).unwrap();

        let names: Vec<_> = registry.groups().iter().map(Group::name).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn test_delete_missing() {
        let mut registry = Registry::new();
        let err = registry.delete_group("nope").unwrap_err();
        assert_eq!(err.kind(), FailureKind::GroupNotFound);
    }

    #[test]
    fn test_select_and_replace() {
        let mut registry = Registry::new();
        registry.create_group("A", 10).unwrap();
        registry.create_group("B", 10).unwrap();
        assert!(registry.selected().is_none());

        registry.select_group("A").unwrap();
        assert_eq!(registry.selected().unwrap().name(), "A");

        registry.select_group("B").unwrap();
        assert_eq!(registry.selected().unwrap().name(), "B");

        let err = registry.select_group("C").unwrap_err();
        assert_eq!(err.kind(), FailureKind::GroupNotFound);
        assert_eq!(registry.selected().unwrap().name(), "B");
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut registry = Registry::new();
        registry.create_group("A", 10).unwrap();
        registry.select_group("A").unwrap();

        registry.delete_group("A").unwrap();
        assert!(registry.selected().is_none());

        // Re-creating the name does not revive the old selection.
        registry.create_group("A", 10).unwrap();
        assert!(registry.selected().is_none());
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut registry = Registry::new();
        registry.create_group("A", 10).unwrap();
        registry.create_group("B", 10).unwrap();
        registry.select_group("A").unwrap();

        registry.delete_group("B").unwrap();
        assert_eq!(registry.selected().unwrap().name(), "A");
    }
}
