//! `usergroups-core` — model building blocks for the user/group directory.
//!
//! This crate contains **pure model** primitives (no locking, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod model;
pub mod value_object;

pub use entity::Entity;
pub use error::{DirectoryError, DirectoryErrorKind, DirectoryResult};
pub use id::GenerationId;
pub use model::{Group, User};
pub use value_object::ValueObject;
