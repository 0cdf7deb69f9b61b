//! # Unsubscribe handles.
//!
//! Every successful `on`/`once` returns a [`Subscription`] that removes
//! exactly that (event, listener) pairing when cancelled. Handles are
//! deliberately inert otherwise:
//! - dropping one does **nothing** — a registration outlives the handle, so
//!   fire-and-forget subscribers can discard it;
//! - [`Subscription::cancel`] is idempotent — cancelling twice, or after an
//!   `off`/`off_all` already removed the listener, is a no-op;
//! - the handle holds only a weak reference to the bus, so it cannot keep a
//!   dropped bus alive.
//!
//! The already-ready replay path returns a *detached* handle: the listener
//! was never registered, so there is nothing to cancel.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::events::EventName;

use super::core::Inner;
use super::registry::Listener;

/// Handle that removes one (event, listener) registration.
pub struct Subscription {
    target: Option<(Weak<Inner>, EventName, Listener)>,
}

impl Subscription {
    /// Handle tied to a live registration.
    pub(crate) fn active(inner: &Arc<Inner>, event: EventName, listener: Listener) -> Self {
        Self {
            target: Some((Arc::downgrade(inner), event, listener)),
        }
    }

    /// Handle with nothing to cancel (already-ready replay path).
    pub(crate) fn detached() -> Self {
        Self { target: None }
    }

    /// Removes the registration this handle was created for.
    ///
    /// Idempotent: repeated calls, calls after the listener was already
    /// removed by other means, and calls on a detached handle all do
    /// nothing. For a `once` registration the handle is keyed on the
    /// *original* listener, so cancelling finds and removes the internal
    /// wrapper.
    pub fn cancel(&self) {
        let Some((bus, event, listener)) = &self.target else {
            return;
        };
        if let Some(inner) = bus.upgrade() {
            inner.remove(event, listener);
        }
    }

    /// `true` if this handle never had a registration to remove.
    pub fn is_detached(&self) -> bool {
        self.target.is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some((_, event, _)) => f.debug_struct("Subscription").field("event", event).finish_non_exhaustive(),
            None => f.write_str("Subscription(detached)"),
        }
    }
}
