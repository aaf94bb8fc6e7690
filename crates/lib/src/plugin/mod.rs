//! Adapter between host lifecycle events and the reconciliation passes.
//!
//! | Trigger         | Passes                                   |
//! |-----------------|------------------------------------------|
//! | startup         | schema, then users, then groups          |
//! | user created    | users (may create the default group)     |
//! | group created   | groups                                   |
//!
//! Every pass run through one [`Plugin`] holds the plugin's pass lock, so
//! events dispatched concurrently through it are reconciled one after the
//! other. Separate `Plugin` values, or separate processes, sharing a
//! directory are not coordinated: two of them can choose the same next uid
//! or both create a default group. Hosts must route all events for one
//! directory through a single `Plugin`.

mod hooks;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

pub use hooks::{EventArgs, EventHandler, EventKind, HandlerRegistry};

use crate::Result;
use crate::reconcile::{
    Context, PassReport, allocate_group_ids, allocate_user_ids, ensure_schema,
};

/// What the startup pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// Schema attributes declared by this run.
    pub attributes_created: usize,
    pub users: PassReport,
    pub groups: PassReport,
}

/// The POSIX id extension as seen by the host.
#[derive(Debug)]
pub struct Plugin {
    ctx: Context,
    pass_lock: Mutex<()>,
}

impl Plugin {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            pass_lock: Mutex::new(()),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.pass_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Startup entry point: declares the schema, then reconciles users and groups.
    ///
    /// # Errors
    /// Stops at the first fatal error; later passes do not run.
    pub fn init(&self) -> Result<StartupReport> {
        let _guard = self.lock();
        let attributes_created = ensure_schema(&self.ctx)?;
        let users = allocate_user_ids(&self.ctx)?;
        let groups = allocate_group_ids(&self.ctx)?;

        let report = StartupReport {
            attributes_created,
            users,
            groups,
        };
        info!(?report, "POSIX id startup reconciliation complete");
        Ok(report)
    }

    /// Reconcile all users after a user was created.
    ///
    /// Returns `args` unchanged; the new user is patched in the directory.
    pub fn on_user_created(&self, args: &EventArgs) -> Result<EventArgs> {
        let _guard = self.lock();
        allocate_user_ids(&self.ctx)?;
        Ok(args.clone())
    }

    /// Reconcile all groups after a group was created.
    ///
    /// Returns `args` unchanged; the new group is patched in the directory.
    pub fn on_group_created(&self, args: &EventArgs) -> Result<EventArgs> {
        let _guard = self.lock();
        allocate_group_ids(&self.ctx)?;
        Ok(args.clone())
    }

    /// Register the user-created and group-created handlers with the host.
    pub fn register(self: &Arc<Self>, registry: &mut HandlerRegistry) {
        registry.register(
            EventKind::UserCreated,
            Arc::new(UserCreatedHandler(Arc::clone(self))),
        );
        registry.register(
            EventKind::GroupCreated,
            Arc::new(GroupCreatedHandler(Arc::clone(self))),
        );
    }
}

struct UserCreatedHandler(Arc<Plugin>);

impl EventHandler for UserCreatedHandler {
    fn handle(&self, args: &EventArgs) -> Result<EventArgs> {
        self.0.on_user_created(args)
    }
}

struct GroupCreatedHandler(Arc<Plugin>);

impl EventHandler for GroupCreatedHandler {
    fn handle(&self, args: &EventArgs) -> Result<EventArgs> {
        self.0.on_group_created(args)
    }
}
