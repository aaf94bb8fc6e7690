//!
//! posixid: POSIX `uidnumber`/`gidnumber` attributes for a directory service.
//!
//! The crate runs inside a host identity store as an extension. The host calls
//! it once at startup and after every user or group creation; each call
//! re-reads the directory and fills in whatever numeric ids are missing.
//!
//! ## Core Concepts
//!
//! * **Directory (`directory::Directory`)**: The host's management API. The
//!   only state the extension touches; nothing is cached between calls.
//! * **Context (`reconcile::Context`)**: The directory handle plus `Settings`,
//!   passed explicitly to every pass.
//! * **Passes (`reconcile`)**: Schema ensurer, default group resolver, user
//!   allocator and group allocator. Each is a full rescan, so a failed write
//!   is retried by the next pass.
//! * **Plugin (`plugin::Plugin`)**: Maps startup and creation events onto the
//!   passes and registers handlers with the host's `plugin::HandlerRegistry`.

pub mod constants;
pub mod directory;
pub mod plugin;
pub mod reconcile;
pub mod settings;

pub use plugin::Plugin;
pub use reconcile::Context;
pub use settings::Settings;

/// Result type used throughout the posixid library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the posixid library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured errors returned by the directory service
    #[error(transparent)]
    Directory(directory::DirectoryError),

    /// Structured errors that abort a reconciliation pass
    #[error(transparent)]
    Reconcile(reconcile::ReconcileError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Directory(_) => "directory",
            Error::Reconcile(_) => "reconcile",
        }
    }

    /// Check if this error indicates a missing user or group.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Directory(err) => err.is_not_found(),
            Error::Reconcile(err) => err.directory_error().is_some_and(|e| e.is_not_found()),
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Directory(err) => err.is_already_exists(),
            Error::Reconcile(err) => err
                .directory_error()
                .is_some_and(|e| e.is_already_exists()),
        }
    }

    /// Check if this error aborted a reconciliation pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Reconcile(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Directory(err) => err.is_io_error(),
            Error::Reconcile(_) => false,
        }
    }
}
