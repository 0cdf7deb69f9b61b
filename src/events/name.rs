//! # Event names: the keys that partition the notification space.
//!
//! [`EventName`] unifies two name spaces at the type level:
//! - a **known** set with statically distinguished members — currently the
//!   single bootstrap event [`EventName::Ready`] (string form `"ready"`),
//!   whose payload is retained and replayed to late subscribers;
//! - an **open** set of arbitrary caller-chosen names ([`EventName::Custom`])
//!   carrying opaque payloads.
//!
//! The public bus API is string-first (`on("ready", ..)`, `emit("save", ..)`);
//! [`EventName::parse`] is the single validation point that rejects empty
//! names and canonicalizes the known ones, so `"ready"` and
//! [`EventName::Ready`] always compare equal.
//!
//! ## Example
//! ```
//! use tickbus::EventName;
//!
//! let ready = EventName::parse("ready").unwrap();
//! assert!(ready.is_ready());
//!
//! let custom = EventName::parse("inventory_changed").unwrap();
//! assert_eq!(custom.as_str(), "inventory_changed");
//!
//! assert!(EventName::parse("").is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::BusError;

/// Name of a bus event.
///
/// Cheap to clone (`Custom` holds an `Arc<str>`), hashable, and usable as a
/// registry key. Construct via [`EventName::parse`] or `TryFrom<&str>`; both
/// reject empty strings with [`BusError::EmptyEventName`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    /// The distinguished bootstrap-readiness event.
    ///
    /// Fired once per bus lifetime when the host reports readiness; its
    /// payload is latched and replayed (deferred) to subscribers that arrive
    /// after the fact.
    Ready,
    /// Any other caller-chosen, non-empty name.
    Custom(Arc<str>),
}

impl EventName {
    /// String form of [`EventName::Ready`].
    pub const READY: &'static str = "ready";

    /// Parses a string into an event name.
    ///
    /// Canonicalizes [`EventName::READY`] to [`EventName::Ready`]; every
    /// other non-empty string becomes [`EventName::Custom`].
    ///
    /// # Errors
    /// [`BusError::EmptyEventName`] if `name` is empty.
    pub fn parse(name: &str) -> Result<Self, BusError> {
        if name.is_empty() {
            return Err(BusError::EmptyEventName);
        }
        if name == Self::READY {
            Ok(EventName::Ready)
        } else {
            Ok(EventName::Custom(Arc::from(name)))
        }
    }

    /// Returns the string form of this name.
    pub fn as_str(&self) -> &str {
        match self {
            EventName::Ready => Self::READY,
            EventName::Custom(name) => name,
        }
    }

    /// `true` for the bootstrap-readiness event.
    pub fn is_ready(&self) -> bool {
        matches!(self, EventName::Ready)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventName {
    type Error = BusError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        EventName::parse(name)
    }
}
