//! # The host boundary.
//!
//! The bus is hosted by some larger runtime that pushes named occurrences at
//! it. That runtime is opaque to the library: it is modeled as two small
//! traits the embedding process implements at the composition point.
//!
//! ## Contract
//! - A [`HostSignal`] is a named occurrence source the bus can subscribe a
//!   handler to. The host invokes handlers on its own thread of control,
//!   one at a time (cooperative, non-preemptive scheduling).
//! - [`HostRuntime::readiness`] is the distinguished bootstrap signal. It is
//!   expected to fire at most meaningfully once per process lifetime; the
//!   bus latches its first payload and ignores repeats.
//! - [`HostRuntime::signal`] looks up an ordinary signal by the host-side
//!   key named in a [`Binding`](crate::Binding). Returning `None` means the
//!   occurrence is simply never produced on this host; the bridge skips it.

use std::sync::Arc;

use crate::events::Payload;

/// Handler the bus hands to a host signal.
pub type SignalHandler = Box<dyn Fn(Payload) + Send + Sync + 'static>;

/// One named occurrence source owned by the host.
///
/// Subscription is append-only: the bus never unsubscribes (the process owns
/// the bus for its lifetime).
pub trait HostSignal: Send + Sync {
    /// Registers a handler the host will invoke with each occurrence's
    /// payload.
    fn subscribe(&self, handler: SignalHandler);
}

/// The host runtime as the bus sees it: a readiness signal plus a keyed
/// lookup of ordinary signals.
pub trait HostRuntime: Send + Sync {
    /// The distinguished bootstrap-readiness signal.
    fn readiness(&self) -> Arc<dyn HostSignal>;

    /// Looks up an ordinary signal by its host-side key.
    ///
    /// `None` means the host does not produce this occurrence; callers must
    /// treat that as normal, not as an error.
    fn signal(&self, key: &str) -> Option<Arc<dyn HostSignal>>;
}
