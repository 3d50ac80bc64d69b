//! User directory: create/find/delete of users keyed by name.

use std::sync::Arc;

use usergroups_core::{DirectoryError, DirectoryResult, User};

use crate::store::DirectoryStore;

/// Registry of known users.
pub trait UserService: Send + Sync {
    /// Register a new user. Fails with `Validation` for a blank name and with
    /// `DuplicateName` if the name is live.
    fn create(&self, user: &User) -> DirectoryResult<()>;

    /// Look up a live user by name.
    fn find_by_name(&self, name: &str) -> Option<User>;

    /// Retire the user's current incarnation.
    ///
    /// Memberships recorded for it are no longer observable, including after
    /// a user with the same name is created again. Deleting an unknown user
    /// is a no-op.
    fn delete(&self, user: &User);

    /// All live users, sorted by name.
    fn list(&self) -> Vec<User>;
}

/// [`UserService`] over a shared [`DirectoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryUserService {
    store: Arc<DirectoryStore>,
}

impl InMemoryUserService {
    pub fn new(store: Arc<DirectoryStore>) -> Self {
        Self { store }
    }
}

impl UserService for InMemoryUserService {
    fn create(&self, user: &User) -> DirectoryResult<()> {
        user.validate()?;
        let mut state = self.store.write();
        match state.users.create(user) {
            Some(generation) => {
                tracing::debug!(user = %user, %generation, "user created");
                Ok(())
            }
            None => {
                tracing::warn!(user = %user, "rejected duplicate user");
                Err(DirectoryError::duplicate_name(user.name()))
            }
        }
    }

    fn find_by_name(&self, name: &str) -> Option<User> {
        self.store.read().users.find(name)
    }

    fn delete(&self, user: &User) {
        let mut state = self.store.write();
        if let Some(generation) = state.users.retire(user.name()) {
            tracing::info!(user = %user, %generation, "user generation retired");
        }
    }

    fn list(&self) -> Vec<User> {
        self.store.read().users.list()
    }
}
