//! Group directory.
//!
//! Each successful [`GroupService::create`] mints a fresh generation for the
//! name. [`GroupService::delete`] retires it, and membership recorded against a
//! retired generation can never be observed again, even after the name is
//! reused.

use std::sync::Arc;

use usergroups_core::{DirectoryError, DirectoryResult, Group};

use crate::store::DirectoryStore;

/// Registry of known groups.
pub trait GroupService: Send + Sync {
    /// Register a new group. Fails with `Validation` for a blank name and with
    /// `DuplicateName` if the name is live.
    fn create(&self, group: &Group) -> DirectoryResult<()>;

    /// Retire the group's live generation. No-op if the group does not exist.
    fn delete(&self, group: &Group);

    /// Look up a live group by name.
    fn find_by_name(&self, name: &str) -> Option<Group>;

    /// All live groups, sorted by name.
    fn list(&self) -> Vec<Group>;
}

/// [`GroupService`] over a shared [`DirectoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryGroupService {
    store: Arc<DirectoryStore>,
}

impl InMemoryGroupService {
    pub fn new(store: Arc<DirectoryStore>) -> Self {
        Self { store }
    }
}

impl GroupService for InMemoryGroupService {
    fn create(&self, group: &Group) -> DirectoryResult<()> {
        group.validate()?;
        let mut state = self.store.write();
        let Some(generation) = state.groups.create(group) else {
            tracing::warn!(group = %group, "rejected duplicate group");
            return Err(DirectoryError::duplicate_name(group.name()));
        };
        tracing::debug!(group = %group, %generation, "group created");
        Ok(())
    }

    fn delete(&self, group: &Group) {
        let retired = self.store.write().groups.retire(group.name());
        if let Some(generation) = retired {
            tracing::info!(group = %group, %generation, "group generation retired");
        }
    }

    fn find_by_name(&self, name: &str) -> Option<Group> {
        self.store.read().groups.find(name)
    }

    fn list(&self) -> Vec<Group> {
        self.store.read().groups.list()
    }
}
