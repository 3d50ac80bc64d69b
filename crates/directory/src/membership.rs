//! Membership coordinator.
//!
//! Membership is stored as pairs of (user generation, group generation), never
//! as pairs of names. Every operation resolves the *current* generation of the
//! user and the group while holding the store lock, so:
//!
//! - a group (or user) that is deleted and created again starts empty, because
//!   the new incarnation has a generation no pair refers to;
//! - pairs tied to retired generations are never returned, even before they
//!   are physically purged.
//!
//! Argument handling is asymmetric: a missing (`None`) reference is always an
//! error, while a user or group that does not exist is an error for
//! `add_user_to_group` only and an empty result or no-op everywhere else.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use usergroups_core::{DirectoryError, DirectoryResult, GenerationId, Group, User};

use crate::config::DirectoryConfig;
use crate::store::{DirectoryState, DirectoryStore};

// ─────────────────────────────────────────────────────────────────────────────
// Relation storage
// ─────────────────────────────────────────────────────────────────────────────

/// The membership relation, indexed by group generation.
#[derive(Debug, Default)]
pub(crate) struct MembershipTable {
    by_group: HashMap<GenerationId, GroupMembers>,
    mutations_since_purge: u64,
}

#[derive(Debug)]
struct GroupMembers {
    group: Group,
    members: HashMap<GenerationId, User>,
}

impl MembershipTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the pair was not present before.
    fn insert(
        &mut self,
        group_generation: GenerationId,
        group: &Group,
        user_generation: GenerationId,
        user: &User,
    ) -> bool {
        let entry = self
            .by_group
            .entry(group_generation)
            .or_insert_with(|| GroupMembers {
                group: group.clone(),
                members: HashMap::new(),
            });

        match entry.members.entry(user_generation) {
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Returns `true` if the pair was present.
    fn remove(&mut self, group_generation: GenerationId, user_generation: GenerationId) -> bool {
        let Some(entry) = self.by_group.get_mut(&group_generation) else {
            return false;
        };
        let removed = entry.members.remove(&user_generation).is_some();
        if entry.members.is_empty() {
            self.by_group.remove(&group_generation);
        }
        removed
    }

    fn contains(&self, group_generation: GenerationId, user_generation: GenerationId) -> bool {
        self.by_group
            .get(&group_generation)
            .is_some_and(|entry| entry.members.contains_key(&user_generation))
    }

    fn members(&self, group_generation: GenerationId) -> impl Iterator<Item = (GenerationId, &User)> {
        self.by_group
            .get(&group_generation)
            .into_iter()
            .flat_map(|entry| entry.members.iter().map(|(generation, user)| (*generation, user)))
    }

    // Linear scan over all groups.
    fn groups_of(&self, user_generation: GenerationId) -> impl Iterator<Item = (GenerationId, &Group)> {
        self.by_group
            .iter()
            .filter(move |(_, entry)| entry.members.contains_key(&user_generation))
            .map(|(generation, entry)| (*generation, &entry.group))
    }

    /// Keep only the pairs for which `keep` returns `true`; returns how many
    /// pairs were dropped.
    fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(GenerationId, &Group, GenerationId, &User) -> bool,
    {
        let before = self.pair_count();
        self.by_group.retain(|group_generation, entry| {
            let group = &entry.group;
            entry
                .members
                .retain(|user_generation, user| keep(*group_generation, group, *user_generation, user));
            !entry.members.is_empty()
        });
        before - self.pair_count()
    }

    /// Physically stored pairs, including unobservable ones.
    pub(crate) fn pair_count(&self) -> usize {
        self.by_group.values().map(|entry| entry.members.len()).sum()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Service
// ─────────────────────────────────────────────────────────────────────────────

/// Many-to-many relation between users and groups.
///
/// All operations address users and groups by value; the generation behind a
/// name is resolved on every call and never cached.
pub trait MembershipService: Send + Sync {
    /// Record that `user` belongs to `group`.
    ///
    /// Fails with `NullArgument` if either reference is `None` (user checked
    /// first), then with `InvalidReference` if the user or the group does not
    /// currently exist. Adding an existing pair is a no-op.
    fn add_user_to_group(&self, user: Option<&User>, group: Option<&Group>) -> DirectoryResult<()>;

    /// Drop `user` from `group`.
    ///
    /// No-op when the pair is absent or when the user or group does not exist.
    fn remove_user_from_group(&self, user: Option<&User>, group: Option<&Group>) -> DirectoryResult<()>;

    /// Whether `user` currently belongs to `group`. `false` for unknown groups.
    fn is_user_in_group(&self, user: Option<&User>, group: Option<&Group>) -> DirectoryResult<bool>;

    /// Snapshot of the members of `group`. Empty for unknown groups.
    ///
    /// Iteration order is unspecified.
    fn get_users_in_group(&self, group: Option<&Group>) -> DirectoryResult<HashSet<User>>;

    /// Snapshot of the groups `user` belongs to. Empty for unknown users.
    fn get_groups_for_user(&self, user: Option<&User>) -> DirectoryResult<HashSet<Group>>;

    /// Physically drop pairs tied to retired user or group generations.
    ///
    /// Never changes the result of any query. Returns the number of pairs
    /// removed.
    fn purge_retired(&self) -> usize;
}

fn require<'a, T>(value: Option<&'a T>, argument: &'static str) -> DirectoryResult<&'a T> {
    value.ok_or_else(|| DirectoryError::null_argument(argument))
}

/// [`MembershipService`] over a shared [`DirectoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryMembershipService {
    store: Arc<DirectoryStore>,
    purge_interval: Option<u64>,
}

impl InMemoryMembershipService {
    pub fn new(store: Arc<DirectoryStore>) -> Self {
        Self::with_config(store, &DirectoryConfig::default())
    }

    pub fn with_config(store: Arc<DirectoryStore>, config: &DirectoryConfig) -> Self {
        Self {
            store,
            purge_interval: config.effective_purge_interval(),
        }
    }

    /// Count a successful mutation and purge once the configured interval is
    /// reached. Must run under the same write guard as the mutation.
    fn after_mutation(&self, state: &mut DirectoryState) {
        let Some(interval) = self.purge_interval else {
            return;
        };
        state.memberships.mutations_since_purge += 1;
        if state.memberships.mutations_since_purge >= interval {
            let removed = purge(state);
            tracing::debug!(removed, "periodic purge of retired memberships");
        }
    }
}

fn purge(state: &mut DirectoryState) -> usize {
    let DirectoryState {
        users,
        groups,
        memberships,
    } = state;

    let removed = memberships.retain(|group_generation, group, user_generation, user| {
        groups.is_live(group.name(), group_generation) && users.is_live(user.name(), user_generation)
    });
    memberships.mutations_since_purge = 0;
    removed
}

impl MembershipService for InMemoryMembershipService {
    fn add_user_to_group(&self, user: Option<&User>, group: Option<&Group>) -> DirectoryResult<()> {
        let user = require(user, "user")?;
        let group = require(group, "group")?;
        let _span = tracing::info_span!("add_user_to_group", user = %user, group = %group).entered();

        let mut state = self.store.write();

        let Some(user_generation) = state.users.resolve(user.name()) else {
            tracing::warn!("add rejected: no such user");
            return Err(DirectoryError::invalid_reference(format!("no such user: {user}")));
        };
        let Some(group_generation) = state.groups.resolve(group.name()) else {
            tracing::warn!("add rejected: no such group");
            return Err(DirectoryError::invalid_reference(format!("no such group: {group}")));
        };

        if state
            .memberships
            .insert(group_generation, group, user_generation, user)
        {
            tracing::debug!("user added to group");
            self.after_mutation(&mut state);
        }
        Ok(())
    }

    fn remove_user_from_group(&self, user: Option<&User>, group: Option<&Group>) -> DirectoryResult<()> {
        let user = require(user, "user")?;
        let group = require(group, "group")?;
        let _span =
            tracing::info_span!("remove_user_from_group", user = %user, group = %group).entered();

        let mut state = self.store.write();

        let (Some(user_generation), Some(group_generation)) = (
            state.users.resolve(user.name()),
            state.groups.resolve(group.name()),
        ) else {
            return Ok(());
        };

        if state.memberships.remove(group_generation, user_generation) {
            tracing::debug!("user removed from group");
            self.after_mutation(&mut state);
        }
        Ok(())
    }

    fn is_user_in_group(&self, user: Option<&User>, group: Option<&Group>) -> DirectoryResult<bool> {
        let user = require(user, "user")?;
        let group = require(group, "group")?;

        let state = self.store.read();
        let found = match (
            state.users.resolve(user.name()),
            state.groups.resolve(group.name()),
        ) {
            (Some(user_generation), Some(group_generation)) => {
                state.memberships.contains(group_generation, user_generation)
            }
            _ => false,
        };
        Ok(found)
    }

    fn get_users_in_group(&self, group: Option<&Group>) -> DirectoryResult<HashSet<User>> {
        let group = require(group, "group")?;

        let state = self.store.read();
        let Some(group_generation) = state.groups.resolve(group.name()) else {
            return Ok(HashSet::new());
        };

        Ok(state
            .memberships
            .members(group_generation)
            .filter(|(user_generation, user)| state.users.is_live(user.name(), *user_generation))
            .map(|(_, user)| user.clone())
            .collect())
    }

    fn get_groups_for_user(&self, user: Option<&User>) -> DirectoryResult<HashSet<Group>> {
        let user = require(user, "user")?;

        let state = self.store.read();
        let Some(user_generation) = state.users.resolve(user.name()) else {
            return Ok(HashSet::new());
        };

        Ok(state
            .memberships
            .groups_of(user_generation)
            .filter(|(group_generation, group)| state.groups.is_live(group.name(), *group_generation))
            .map(|(_, group)| group.clone())
            .collect())
    }

    fn purge_retired(&self) -> usize {
        let _span = tracing::debug_span!("purge_retired").entered();
        let mut state = self.store.write();
        let removed = purge(&mut state);
        if removed > 0 {
            tracing::info!(removed, "purged memberships of retired generations");
        }
        removed
    }
}
