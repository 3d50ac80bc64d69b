//! Shared in-memory state behind the directory services.
//!
//! All three services hold the same [`DirectoryStore`]. A single `RwLock`
//! guards users, groups and memberships together so that the coordinator can
//! resolve generations and apply its effect under one guard.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use usergroups_core::{Entity, GenerationId, Group, User, ValueObject};

use crate::membership::MembershipTable;

/// Name-keyed table of live entities, each pinned to the generation minted by
/// its most recent successful `create`.
#[derive(Debug)]
pub(crate) struct GenerationTable<E> {
    live: HashMap<String, LiveEntry<E>>,
}

#[derive(Debug, Clone)]
struct LiveEntry<E> {
    entity: E,
    generation: GenerationId,
}

impl<E> GenerationTable<E>
where
    E: Entity<Id = str> + ValueObject + Ord,
{
    pub(crate) fn new() -> Self {
        Self {
            live: HashMap::new(),
        }
    }

    /// Register `entity` under a fresh generation.
    ///
    /// Returns `None` when a live entry already uses the name.
    pub(crate) fn create(&mut self, entity: &E) -> Option<GenerationId> {
        if self.live.contains_key(entity.id()) {
            return None;
        }
        let generation = GenerationId::mint();
        self.live.insert(
            entity.id().to_owned(),
            LiveEntry {
                entity: entity.clone(),
                generation,
            },
        );
        Some(generation)
    }

    /// Retire the live generation for `name`, if any.
    pub(crate) fn retire(&mut self, name: &str) -> Option<GenerationId> {
        self.live.remove(name).map(|entry| entry.generation)
    }

    /// Current live generation for `name`.
    pub(crate) fn resolve(&self, name: &str) -> Option<GenerationId> {
        self.live.get(name).map(|entry| entry.generation)
    }

    pub(crate) fn is_live(&self, name: &str, generation: GenerationId) -> bool {
        self.resolve(name) == Some(generation)
    }

    pub(crate) fn find(&self, name: &str) -> Option<E> {
        self.live.get(name).map(|entry| entry.entity.clone())
    }

    /// All live entities, sorted by name.
    pub(crate) fn list(&self) -> Vec<E> {
        let mut entities: Vec<E> = self.live.values().map(|e| e.entity.clone()).collect();
        entities.sort();
        entities
    }
}

/// Everything the directory knows, guarded as one unit.
#[derive(Debug)]
pub(crate) struct DirectoryState {
    pub(crate) users: GenerationTable<User>,
    pub(crate) groups: GenerationTable<Group>,
    pub(crate) memberships: MembershipTable,
}

/// Lock-guarded [`DirectoryState`] shared by the services of one `Services`.
#[derive(Debug)]
pub struct DirectoryStore {
    inner: RwLock<DirectoryState>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(DirectoryState {
                users: GenerationTable::new(),
                groups: GenerationTable::new(),
                memberships: MembershipTable::new(),
            }),
        }
    }

    // Every mutation is a single map/set update, so a panicked holder cannot
    // leave a half-applied change behind; poisoning is safe to ignore.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, DirectoryState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, DirectoryState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_mints_new_generation_after_retire() {
        let mut table: GenerationTable<Group> = GenerationTable::new();
        let foo = Group::new("foo");

        let first = table.create(&foo).unwrap();
        assert_eq!(table.resolve("foo"), Some(first));
        assert!(table.create(&foo).is_none());

        assert_eq!(table.retire("foo"), Some(first));
        assert_eq!(table.resolve("foo"), None);
        assert!(table.find("foo").is_none());

        let second = table.create(&foo).unwrap();
        assert_ne!(first, second);
        assert!(table.is_live("foo", second));
        assert!(!table.is_live("foo", first));
    }

    #[test]
    fn retire_unknown_name_is_none() {
        let mut table: GenerationTable<User> = GenerationTable::new();
        assert_eq!(table.retire("nobody"), None);
    }

    #[test]
    fn list_is_sorted() {
        let mut table: GenerationTable<User> = GenerationTable::new();
        for name in ["george", "fred", "alice"] {
            table.create(&User::new(name));
        }
        let names: Vec<String> = table.list().into_iter().map(String::from).collect();
        assert_eq!(names, vec!["alice", "fred", "george"]);
    }
}
