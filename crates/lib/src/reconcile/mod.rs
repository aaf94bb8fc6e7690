//! Reconciliation of POSIX identity attributes.
//!
//! Each pass lists the current state from the directory, computes the missing
//! `uidnumber`/`gidnumber` values and patches them back. Nothing is kept
//! between passes: the next free uid is re-derived from the directory every
//! time, so a pass that was interrupted or partially failed is repaired by
//! whichever pass runs next.
//!
//! * [`ensure_schema`] declares the attributes the other passes write.
//! * [`resolve_default_gid`] finds or creates the shared default group.
//! * [`allocate_user_ids`] fills in missing user uid and gid numbers.
//! * [`allocate_group_ids`] fills in missing group gid numbers.
//!
//! Concurrent passes against the same directory are not coordinated here and
//! may pick the same uid; see [`crate::plugin::Plugin`] for serialization.

mod default_group;
mod errors;
mod groups;
mod schema;
mod users;

use std::sync::Arc;

pub use default_group::resolve_default_gid;
pub use errors::ReconcileError;
pub use groups::allocate_group_ids;
pub use schema::{REQUIRED_ATTRIBUTES, RequiredAttribute, ensure_schema};
pub use users::allocate_user_ids;

use crate::directory::{Directory, GroupId};
use crate::settings::Settings;

/// Capabilities handed to every pass: the directory and the settings.
#[derive(Clone)]
pub struct Context {
    directory: Arc<dyn Directory>,
    settings: Settings,
}

impl Context {
    pub fn new(directory: Arc<dyn Directory>, settings: Settings) -> Self {
        Self {
            directory,
            settings,
        }
    }

    pub fn directory(&self) -> &dyn Directory {
        self.directory.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The `gidnumber` derived from a group's directory id.
    pub fn gid_for(&self, group: GroupId) -> Result<i64, ReconcileError> {
        checked_offset(self.settings.gid_offset, group.0)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

pub(crate) fn checked_offset(base: i64, increment: i64) -> Result<i64, ReconcileError> {
    base.checked_add(increment)
        .ok_or(ReconcileError::IdOverflow { base, increment })
}

/// Outcome of one allocation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Identities listed by the directory.
    pub scanned: usize,
    /// Identities successfully patched.
    pub updated: usize,
    /// Identities whose patch failed and were skipped.
    pub failed: usize,
}

impl PassReport {
    /// True when nothing needed to be written.
    pub fn is_noop(&self) -> bool {
        self.updated == 0 && self.failed == 0
    }
}
