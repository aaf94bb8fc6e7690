//! Reconciliation settings.
//!
//! The two fixed integers and the default group name the allocators work
//! with. Every field has a default, so a partial JSON document is enough to
//! override a single value.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GROUP_NAME, GID_OFFSET, UID_BASE};

/// Settings shared by every reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lower bound for allocated user ids; the first allocation is `uid_base + 1`.
    pub uid_base: i64,
    /// Offset added to a group's directory id to derive its `gidnumber`.
    pub gid_offset: i64,
    /// Display name of the shared default group.
    pub default_group_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            uid_base: UID_BASE,
            gid_offset: GID_OFFSET,
            default_group_name: DEFAULT_GROUP_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Override the user id base.
    pub fn with_uid_base(mut self, uid_base: i64) -> Self {
        self.uid_base = uid_base;
        self
    }

    /// Override the group id offset.
    pub fn with_gid_offset(mut self, gid_offset: i64) -> Self {
        self.gid_offset = gid_offset;
        self
    }

    /// Override the default group's display name.
    pub fn with_default_group_name(mut self, name: impl Into<String>) -> Self {
        self.default_group_name = name.into();
        self
    }
}
