//! Error types for directory operations.

use thiserror::Error;

use super::types::{AttributeScope, AttributeType, GroupId, UserId};

/// Errors returned by a [`Directory`](super::Directory) implementation.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No user with this id exists.
    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    /// No group with this id exists.
    #[error("Group not found: {id}")]
    GroupNotFound { id: GroupId },

    /// A user with this id already exists.
    #[error("User already exists: {id}")]
    UserAlreadyExists { id: UserId },

    /// A group with this display name already exists.
    #[error("Group already exists: {display_name}")]
    GroupAlreadyExists { display_name: String },

    /// The schema already declares this attribute.
    #[error("Attribute {name} already exists in the {scope} schema")]
    AttributeAlreadyExists { scope: AttributeScope, name: String },

    /// An update referenced an attribute the schema does not declare.
    #[error("Attribute {name} is not declared in the {scope} schema")]
    UnknownAttribute { scope: AttributeScope, name: String },

    /// An update carried a value of the wrong type.
    #[error("Attribute {name} expects {expected}, got {actual}")]
    AttributeTypeMismatch {
        name: String,
        expected: AttributeType,
        actual: AttributeType,
    },

    /// No further group id can be assigned.
    #[error("Group ids exhausted at {next}")]
    GroupIdsExhausted { next: i64 },

    /// The directory refused the request.
    #[error("Directory rejected {operation}: {reason}")]
    Rejected { operation: String, reason: String },

    /// Reading or writing the persistence file failed.
    #[error("Directory file I/O error")]
    FileIo {
        #[source]
        source: std::io::Error,
    },

    /// The persistence file could not be encoded or decoded.
    #[error("Directory serialization failed")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

impl DirectoryError {
    /// Check if this error indicates a missing identity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DirectoryError::UserNotFound { .. } | DirectoryError::GroupNotFound { .. }
        )
    }

    /// Check if this error indicates something already exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            DirectoryError::UserAlreadyExists { .. }
                | DirectoryError::GroupAlreadyExists { .. }
                | DirectoryError::AttributeAlreadyExists { .. }
        )
    }

    /// Check if this error comes from schema validation of an update.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            DirectoryError::UnknownAttribute { .. } | DirectoryError::AttributeTypeMismatch { .. }
        )
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, DirectoryError::FileIo { .. })
    }
}

impl From<DirectoryError> for crate::Error {
    fn from(err: DirectoryError) -> Self {
        crate::Error::Directory(err)
    }
}
