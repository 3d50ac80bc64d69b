//! Service wiring.
//!
//! [`ServiceFactory`] builds one store and hands out the three services that
//! share it. There is no process-wide instance: every `Services` value is an
//! independent directory.

use std::sync::Arc;

use crate::config::DirectoryConfig;
use crate::groups::{GroupService, InMemoryGroupService};
use crate::membership::{InMemoryMembershipService, MembershipService};
use crate::store::DirectoryStore;
use crate::users::{InMemoryUserService, UserService};

/// The user, group and membership services of one directory.
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    group_service: Arc<dyn GroupService>,
    membership_service: Arc<dyn MembershipService>,
}

impl Services {
    pub fn user_service(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    pub fn group_service(&self) -> Arc<dyn GroupService> {
        self.group_service.clone()
    }

    pub fn membership_service(&self) -> Arc<dyn MembershipService> {
        self.membership_service.clone()
    }
}

impl core::fmt::Debug for Services {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Builds [`Services`] backed by a fresh in-memory store.
#[derive(Debug, Clone, Default)]
pub struct ServiceFactory {
    config: DirectoryConfig,
}

impl ServiceFactory {
    /// Services with the default configuration.
    pub fn create_services() -> Services {
        Self::default().create()
    }

    pub fn with_config(config: DirectoryConfig) -> Self {
        Self { config }
    }

    pub fn create(&self) -> Services {
        let store = Arc::new(DirectoryStore::new());
        tracing::debug!(
            purge_interval = ?self.config.effective_purge_interval(),
            "creating directory services"
        );

        Services {
            user_service: Arc::new(InMemoryUserService::new(store.clone())),
            group_service: Arc::new(InMemoryGroupService::new(store.clone())),
            membership_service: Arc::new(InMemoryMembershipService::with_config(store, &self.config)),
        }
    }
}
