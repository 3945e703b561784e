//! # Group Registry
//!
//! Every group known during one inventory pass, keyed by name.
//!
//! The registry is created fresh for each pass, optionally seeded from the
//! class mapping, and grows as new projects are discovered. Nothing is ever
//! removed from it while a pass is running; stale groups are handled by the
//! cleanup stage.

use std::collections::BTreeMap;

use labmon_common::inventory::GroupDescriptor;
use thiserror::Error;

use crate::sources::mapping::ClassMapping;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("group {0} is not registered")]
    UnknownGroup(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRegistry {
    groups: BTreeMap<String, GroupDescriptor>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(mapping: &ClassMapping) -> Self {
        let mut registry = Self::new();
        registry.seed(mapping);
        registry
    }

    /// Adds the class-driven groups of `mapping`.
    ///
    /// Groups already present keep their description; the mapping's classes are appended.
    pub fn seed(&mut self, mapping: &ClassMapping) {
        for (name, mapped) in mapping.iter() {
            let group = self
                .groups
                .entry(name.to_string())
                .or_insert_with(|| GroupDescriptor::new(name, mapped.description.as_str()));
            for class in &mapped.classes {
                if !group.classes.contains(class) {
                    group.classes.push(class.clone());
                }
            }
        }
    }

    /// Creates the group for `project` unless it exists. Returns whether it was created.
    pub fn ensure_project(&mut self, project: &str) -> bool {
        if self.groups.contains_key(project) {
            return false;
        }
        self.groups
            .insert(project.to_string(), GroupDescriptor::project(project));
        true
    }

    pub fn add_member(&mut self, group: &str, fqdn: &str) -> Result<(), RegistryError> {
        let descriptor = self
            .groups
            .get_mut(group)
            .ok_or_else(|| RegistryError::UnknownGroup(group.to_string()))?;
        descriptor.members.push(fqdn.to_string());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&GroupDescriptor> {
        self.groups.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &GroupDescriptor> {
        self.groups.values()
    }

    /// Groups that declare at least one triggering class, ordered by name.
    pub fn class_driven(&self) -> impl Iterator<Item = &GroupDescriptor> {
        self.iter().filter(|g| g.is_class_driven())
    }

    /// Groups with at least one member. Only these get a config file.
    pub fn populated(&self) -> impl Iterator<Item = &GroupDescriptor> {
        self.iter().filter(|g| !g.members.is_empty())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
