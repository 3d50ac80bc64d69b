//! Named directory entities.
//!
//! `User` and `Group` are immutable handles compared, ordered and hashed by
//! name. They never carry the generation a directory minted for them; the
//! directories resolve that on every call.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::DirectoryError;
use crate::value_object::ValueObject;

/// A named principal that can belong to groups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct User {
    name: String,
}

/// A named collection of users.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Group {
    name: String,
}

macro_rules! impl_named_entity {
    ($t:ident, $label:literal) => {
        impl $t {
            /// Create a handle without validating the name.
            ///
            /// Prefer [`Self::try_new`] for names that come from outside the
            /// program.
            pub fn new(name: impl Into<String>) -> Self {
                Self { name: name.into() }
            }

            /// Create a handle, rejecting blank names.
            pub fn try_new(name: impl Into<String>) -> Result<Self, DirectoryError> {
                let entity = Self { name: name.into() };
                entity.validate()?;
                Ok(entity)
            }

            /// Reject blank names. Directories call this before registering
            /// a handle built with [`Self::new`].
            pub fn validate(&self) -> Result<(), DirectoryError> {
                if self.name.trim().is_empty() {
                    return Err(DirectoryError::validation(concat!(
                        $label,
                        " name cannot be empty"
                    )));
                }
                Ok(())
            }

            pub fn name(&self) -> &str {
                &self.name
            }
        }

        impl Entity for $t {
            type Id = str;

            fn id(&self) -> &str {
                &self.name
            }
        }

        impl ValueObject for $t {}

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.name)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DirectoryError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.name
            }
        }

        impl FromStr for $t {
            type Err = DirectoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_new(s)
            }
        }
    };
}

impl_named_entity!(User, "user");
impl_named_entity!(Group, "group");
