//! # Opaque event payloads.
//!
//! The bus forwards payloads without inspecting or validating them: a
//! [`Payload`] is an `Arc`-wrapped [`Any`] value, cheap to clone and share
//! between the latch, deferred jobs, and every listener in a snapshot.
//! Consumers that know the concrete type of a given event's payload recover
//! it with [`Payload::downcast_ref`].
//!
//! ## Example
//! ```
//! use tickbus::Payload;
//!
//! struct BlockBroken { x: i32, y: i32, z: i32 }
//!
//! let payload = Payload::new(BlockBroken { x: 1, y: 64, z: -3 });
//! let ev = payload.downcast_ref::<BlockBroken>().unwrap();
//! assert_eq!(ev.y, 64);
//! assert!(payload.downcast_ref::<String>().is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque payload attached to an emitted event.
///
/// The bus only moves payloads around; it never looks inside. Cloning is an
/// `Arc` bump, so retaining the readiness payload and handing the same
/// payload to every snapshotted listener costs nothing.
#[derive(Clone)]
pub struct Payload(Arc<dyn Any + Send + Sync>);

impl Payload {
    /// Wraps a value as an opaque payload.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Payload(Arc::new(value))
    }

    /// An empty payload, for events that carry no data.
    pub fn empty() -> Self {
        Payload(Arc::new(()))
    }

    /// Borrows the payload as a concrete type, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// `true` if the payload is a value of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::empty()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Payload(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_matches_wrapped_type() {
        let payload = Payload::new(42u32);
        assert!(payload.is::<u32>());
        assert_eq!(payload.downcast_ref::<u32>(), Some(&42));
        assert!(payload.downcast_ref::<i64>().is_none());
    }

    #[test]
    fn test_clones_share_the_value() {
        let payload = Payload::new(String::from("stamp"));
        let copy = payload.clone();
        assert_eq!(copy.downcast_ref::<String>().unwrap(), "stamp");
    }

    #[test]
    fn test_empty_payload_is_unit() {
        assert!(Payload::empty().is::<()>());
        assert!(Payload::default().is::<()>());
    }
}
