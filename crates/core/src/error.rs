//! Directory error model.

use thiserror::Error;

/// Result type used across the directory services.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory-level error.
///
/// Every variant describes a caller mistake. The store is in-memory, so there
/// is no transient failure and nothing here is worth retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A required user or group reference was not supplied.
    #[error("missing required argument: {0}")]
    NullArgument(&'static str),

    /// The referenced user or group does not currently exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A live entity with the same name already exists.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// A value failed validation (e.g. blank name, bad config).
    #[error("validation failed: {0}")]
    Validation(String),
}

/// Error category, for callers that only care which class of failure occurred.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DirectoryErrorKind {
    NullArgument,
    InvalidReference,
    DuplicateName,
    Validation,
}

impl DirectoryError {
    pub fn null_argument(argument: &'static str) -> Self {
        Self::NullArgument(argument)
    }

    pub fn invalid_reference(msg: impl Into<String>) -> Self {
        Self::InvalidReference(msg.into())
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn kind(&self) -> DirectoryErrorKind {
        match self {
            Self::NullArgument(_) => DirectoryErrorKind::NullArgument,
            Self::InvalidReference(_) => DirectoryErrorKind::InvalidReference,
            Self::DuplicateName(_) => DirectoryErrorKind::DuplicateName,
            Self::Validation(_) => DirectoryErrorKind::Validation,
        }
    }
}
