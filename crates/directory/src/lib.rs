//! `usergroups-directory` — in-process directory of users, groups and the
//! membership relation between them.
//!
//! Groups and users are addressed by name. Internally each `create` mints a
//! new generation for the name, and membership is anchored to generations, so
//! deleting and recreating a group (or user) never resurrects old membership.

pub mod config;
pub mod groups;
pub mod membership;
pub mod services;
pub mod store;
pub mod users;

pub use config::{DirectoryConfig, DEFAULT_PURGE_INTERVAL};
pub use groups::{GroupService, InMemoryGroupService};
pub use membership::{InMemoryMembershipService, MembershipService};
pub use services::{ServiceFactory, Services};
pub use store::DirectoryStore;
pub use users::{InMemoryUserService, UserService};

pub use usergroups_core::{DirectoryError, DirectoryErrorKind, DirectoryResult, Group, User};
