//! # Failure policy for panicking listeners.
//!
//! A listener that panics during dispatch must not take down the emitter or
//! the rest of the snapshot. The dispatch boundary catches the panic,
//! reduces it to a short message, and hands it to the bus's
//! [`FailurePolicy`]. The policy call is itself guarded: a panicking policy
//! is swallowed, because the diagnostic channel is best-effort by contract.
//!
//! The default policy is [`LogFailures`], which reports through the `log`
//! facade. Tests typically install a recording policy instead and assert on
//! what was captured.

use std::any::Any;

use crate::events::EventName;

/// Strategy invoked when a listener panics during dispatch.
///
/// Implementations must not assume they are called from any particular
/// thread, and should not panic — if they do, the panic is caught and
/// dropped.
pub trait FailurePolicy: Send + Sync {
    /// Reports one listener failure.
    ///
    /// # Parameters
    /// - `event`: the event whose dispatch triggered the failure
    /// - `reason`: short panic message extracted from the unwind payload
    fn on_listener_panic(&self, event: &EventName, reason: &str);
}

/// Default policy: report listener panics via `log::error!`.
///
/// The library never installs a logger; if the embedding process has none,
/// reports vanish, which is the intended best-effort behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFailures;

impl FailurePolicy for LogFailures {
    fn on_listener_panic(&self, event: &EventName, reason: &str) {
        log::error!("bus listener panicked: event={event} reason={reason}");
    }
}

/// Reduces an unwind payload to a printable message.
///
/// Panics raised with `panic!("literal")` or `panic!("{..}", ..)` carry a
/// `&'static str` or `String`; anything else is opaque.
pub(crate) fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(msg) = err.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = err.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_extracts_str_and_string() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("formatted boom"));
        assert_eq!(panic_message(boxed.as_ref()), "formatted boom");

        let boxed: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
