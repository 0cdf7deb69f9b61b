//! Pluggable policies the bus consults at its failure boundary.
//!
//! ## Contents
//! - [`FailurePolicy`] — strategy invoked when a listener panics
//! - [`LogFailures`] — default policy reporting through the `log` facade

mod failure;

pub use failure::{FailurePolicy, LogFailures};

pub(crate) use failure::panic_message;
