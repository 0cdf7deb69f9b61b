//! Error types used by the bus.
//!
//! The bus has exactly one caller-visible failure mode: an invalid argument
//! detected synchronously at the registration/emission boundary
//! ([`BusError::EmptyEventName`]). Listener panics are *not* errors from the
//! caller's point of view — they are caught at the dispatch boundary and
//! routed to the configured [`FailurePolicy`](crate::FailurePolicy).
//! Scheduling degradation is likewise recovered locally (immediate
//! execution) and never surfaced.

use thiserror::Error;

/// # Errors raised by bus operations.
///
/// Raised synchronously by `on`/`once`/`off`/`off_all`/`emit` so callers can
/// rely on registration either succeeding or failing before the call returns.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The event name was empty. Event names partition the notification
    /// space and an empty key is always a caller bug, so it is rejected
    /// rather than silently ignored.
    #[error("event name must be a non-empty string")]
    EmptyEventName,
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use tickbus::BusError;
    ///
    /// assert_eq!(BusError::EmptyEventName.as_label(), "empty_event_name");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::EmptyEventName => "empty_event_name",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::EmptyEventName => "event name must be a non-empty string".to_string(),
        }
    }
}
