//! Error types for reconciliation passes.
//!
//! Every variant here aborts the pass that raised it. Per-identity patch
//! failures never surface as a `ReconcileError`; they are logged and counted
//! in the pass report instead.

use thiserror::Error;

use crate::directory::{AttributeScope, DirectoryError, GroupId};

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The directory refused to declare a required schema attribute.
    #[error("Failed to create {scope} attribute {name}")]
    SchemaAttributeCreation {
        scope: AttributeScope,
        name: String,
        #[source]
        source: DirectoryError,
    },

    /// The schema snapshot could not be read.
    #[error("Failed to read the directory schema")]
    SchemaUnavailable {
        #[source]
        source: DirectoryError,
    },

    /// Users or groups could not be listed.
    #[error("Failed to list {what}")]
    ListingFailed {
        what: &'static str,
        #[source]
        source: DirectoryError,
    },

    /// The default group could not be created.
    #[error("Failed to create default group {display_name}")]
    DefaultGroupCreation {
        display_name: String,
        #[source]
        source: DirectoryError,
    },

    /// The default group exists but its gidnumber could not be written.
    #[error("Failed to set gidnumber on default group {id}")]
    DefaultGroupUpdate {
        id: GroupId,
        #[source]
        source: DirectoryError,
    },

    /// A derived id does not fit in an `i64`.
    #[error("Numeric id overflow: {base} + {increment}")]
    IdOverflow { base: i64, increment: i64 },
}

impl ReconcileError {
    /// Check if this error was caused by the default group.
    pub fn is_default_group_error(&self) -> bool {
        matches!(
            self,
            ReconcileError::DefaultGroupCreation { .. } | ReconcileError::DefaultGroupUpdate { .. }
        )
    }

    /// Check if this error was caused by the schema.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            ReconcileError::SchemaAttributeCreation { .. } | ReconcileError::SchemaUnavailable { .. }
        )
    }

    /// The underlying directory error, if any.
    pub fn directory_error(&self) -> Option<&DirectoryError> {
        match self {
            ReconcileError::SchemaAttributeCreation { source, .. }
            | ReconcileError::SchemaUnavailable { source }
            | ReconcileError::ListingFailed { source, .. }
            | ReconcileError::DefaultGroupCreation { source, .. }
            | ReconcileError::DefaultGroupUpdate { source, .. } => Some(source),
            ReconcileError::IdOverflow { .. } => None,
        }
    }
}

impl From<ReconcileError> for crate::Error {
    fn from(err: ReconcileError) -> Self {
        crate::Error::Reconcile(err)
    }
}
