//! Constants used throughout the posixid library.
//!
//! Attribute names are the lowercase forms the directory service stores in
//! its schema.

/// User and group attribute holding the numeric POSIX group id.
pub const GIDNUMBER: &str = "gidnumber";

/// User attribute holding the numeric POSIX user id.
pub const UIDNUMBER: &str = "uidnumber";

/// Floor for allocated user ids. The first allocated uid is `UID_BASE + 1`.
pub const UID_BASE: i64 = 100_000;

/// Added to a group's directory id to form its `gidnumber`.
pub const GID_OFFSET: i64 = 100_000;

/// Display name of the group supplying the fallback `gidnumber` for users.
pub const DEFAULT_GROUP_NAME: &str = "posix_users";
