//! # Listener registry and once-wrapper bookkeeping.
//!
//! [`Registry`] owns two maps:
//! - **listeners**: event name → insertion-ordered listeners. Insertion is
//!   idempotent per listener identity, so registering the same `Arc` twice
//!   under one name stores it once.
//! - **once entries**: event name → (original, wrapper) pairs. `once`
//!   registers an internal wrapper in the listener map; the pair lets
//!   removal by the *original* reference find the wrapper actually stored.
//!
//! ## Identity
//! A listener's identity is its `Arc` allocation: clones of one `Arc` are
//! the same listener, two `Arc`s built from identical closures are not.
//! Comparison uses the data pointer only, never the vtable.
//!
//! The registry is plain data — locking and dispatch live in
//! [`core`](super::core).

use std::collections::HashMap;
use std::sync::Arc;

use crate::events::{EventName, Payload};

/// A registered callback.
///
/// Invoked with a borrowed payload; returns nothing — the bus never
/// interprets a listener's result. Identity is the `Arc` allocation, which
/// is what `off` and [`Subscription::cancel`](crate::Subscription::cancel)
/// key on.
pub type Listener = Arc<dyn Fn(&Payload) + Send + Sync + 'static>;

/// Wraps a closure as a [`Listener`].
///
/// # Example
/// ```
/// use tickbus::{listener, Payload};
///
/// let print = listener(|_p: &Payload| println!("tick"));
/// let same = print.clone(); // same listener identity
/// ```
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&Payload) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// `true` if both handles name the same listener allocation.
fn same(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Bookkeeping pair for one `once` registration.
struct OnceEntry {
    original: Listener,
    wrapper: Listener,
}

/// Listener storage keyed by event name.
#[derive(Default)]
pub(crate) struct Registry {
    listeners: HashMap<EventName, Vec<Listener>>,
    once: HashMap<EventName, Vec<OnceEntry>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert of a plain listener.
    pub(crate) fn insert(&mut self, event: &EventName, listener: &Listener) {
        let slot = self.listeners.entry(event.clone()).or_default();
        if !slot.iter().any(|l| same(l, listener)) {
            slot.push(listener.clone());
        }
    }

    /// Inserts a once wrapper and records its (original → wrapper) pair.
    pub(crate) fn insert_once(
        &mut self,
        event: &EventName,
        original: &Listener,
        wrapper: &Listener,
    ) {
        self.once.entry(event.clone()).or_default().push(OnceEntry {
            original: original.clone(),
            wrapper: wrapper.clone(),
        });
        self.insert(event, wrapper);
    }

    /// Removes one listener by identity.
    ///
    /// If `listener` is the original of a recorded once pair, the most
    /// recent matching pair is dropped and its wrapper is removed from the
    /// listener map. The plain listener (if present) is removed as well.
    /// Unknown listeners are a no-op.
    pub(crate) fn remove(&mut self, event: &EventName, listener: &Listener) {
        let wrapper = self.once.get_mut(event).and_then(|entries| {
            let at = entries.iter().rposition(|e| same(&e.original, listener))?;
            Some(entries.remove(at).wrapper)
        });
        if self.once.get(event).is_some_and(Vec::is_empty) {
            self.once.remove(event);
        }

        if let Some(slot) = self.listeners.get_mut(event) {
            if let Some(wrapper) = wrapper {
                slot.retain(|l| !same(l, &wrapper));
            }
            slot.retain(|l| !same(l, listener));
            if slot.is_empty() {
                self.listeners.remove(event);
            }
        }
    }

    /// Removes every plain and once-wrapped listener for an event.
    pub(crate) fn remove_all(&mut self, event: &EventName) {
        self.listeners.remove(event);
        self.once.remove(event);
    }

    /// Immutable snapshot of the listeners for one event, in insertion
    /// order. Dispatch iterates the snapshot, so registry mutation during a
    /// dispatch only affects later emissions.
    pub(crate) fn snapshot(&self, event: &EventName) -> Vec<Listener> {
        self.listeners.get(event).cloned().unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn len(&self, event: &EventName) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }
}
