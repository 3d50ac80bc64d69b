//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Directory entities are addressed by their public name; the internal
/// generation a directory assigns to a name is not part of the identity.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: ?Sized + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
