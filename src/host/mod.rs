//! The host boundary: signal traits, the bridge, and the deferred-execution
//! capability.
//!
//! ## Contents
//! - [`HostRuntime`], [`HostSignal`] — the opaque host as the bus sees it
//! - [`Binding`] — one (bus event ← host signal) pair of the bridge table
//! - [`Scheduler`], [`Job`], [`ScheduleError`] — "run on the next safe tick"
//! - `TokioScheduler` — ready-made scheduler (feature `tokio-scheduler`)

mod bridge;
mod runtime;
mod scheduler;

pub use bridge::Binding;
pub use runtime::{HostRuntime, HostSignal, SignalHandler};
pub use scheduler::{Job, ScheduleError, Scheduler};

#[cfg(feature = "tokio-scheduler")]
pub use scheduler::TokioScheduler;

pub(crate) use bridge::attach_bridge;
