//! Host lifecycle events and the handlers registered for them.
//!
//! The host directory service owns a [`HandlerRegistry`] and calls
//! [`HandlerRegistry::dispatch`] after it has persisted a new identity. A
//! handler receives the creation payload and returns the payload the host
//! should continue with.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::directory::{Group, User};

/// Lifecycle events a handler can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    UserCreated,
    GroupCreated,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::UserCreated => f.write_str("user_created"),
            EventKind::GroupCreated => f.write_str("group_created"),
        }
    }
}

/// Payload of a lifecycle event: the identity as the host persisted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventArgs {
    UserCreated { user: User },
    GroupCreated { group: Group },
}

impl EventArgs {
    pub fn kind(&self) -> EventKind {
        match self {
            EventArgs::UserCreated { .. } => EventKind::UserCreated,
            EventArgs::GroupCreated { .. } => EventKind::GroupCreated,
        }
    }
}

/// A handler called by the host for one kind of lifecycle event.
pub trait EventHandler: Send + Sync {
    /// Called after the identity in `args` has been persisted.
    ///
    /// # Returns
    /// The payload the host should continue with. Handlers that only patch
    /// identities through the directory return `args` unchanged.
    fn handle(&self, args: &EventArgs) -> Result<EventArgs>;
}

/// Host-side table of registered handlers.
///
/// Several handlers may subscribe to the same event; they run in
/// registration order and each one sees the payload returned by the previous.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to `kind`.
    pub fn register(&mut self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Run every handler registered for the event's kind.
    ///
    /// A failing handler is logged and the remaining handlers still run with
    /// the last good payload.
    ///
    /// # Returns
    /// The final payload, or the first error encountered. An event with no
    /// handlers returns its payload unchanged.
    pub fn dispatch(&self, args: EventArgs) -> Result<EventArgs> {
        let kind = args.kind();
        let Some(handlers) = self.handlers.get(&kind) else {
            tracing::debug!(event = %kind, "No handlers registered");
            return Ok(args);
        };

        let mut current = args;
        let mut first_error = None;
        for handler in handlers {
            match handler.handle(&current) {
                Ok(next) => current = next,
                Err(e) => {
                    tracing::error!(event = %kind, error = %e, "Event handler failed");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(current),
        }
    }

    /// Check if any handler is registered for `kind`.
    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers.get(&kind).is_some_and(|handlers| !handlers.is_empty())
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
