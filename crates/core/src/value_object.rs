//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// `User` and `Group` are value objects from a caller's point of view: two
/// handles carrying the same name are interchangeable, and neither carries the
/// generation a directory minted for it. Handing a stale `Group` to a service
/// after the group was deleted and recreated therefore addresses the *new*
/// incarnation.
pub trait ValueObject: Clone + Eq + core::hash::Hash + core::fmt::Debug {}
