//! # Deferred-execution capability.
//!
//! The bus defers exactly one kind of work: replaying the retained readiness
//! payload to late subscribers, and running the readiness latch itself. Both
//! go through [`Scheduler::schedule`], an injected "run this on the host's
//! next safe tick" capability.
//!
//! ## Degradation
//! Scheduling is best-effort. If no scheduler is configured, or
//! [`Scheduler::schedule`] hands the job back via [`ScheduleError`], the bus
//! runs the job immediately on the calling thread. Degradation is recovered
//! locally and never reported to any caller.
//!
//! A test double is a few lines: queue the jobs, drain them when the test
//! says "tick" (see the tests in [`crate::bus`]).

use std::fmt;

/// A deferred unit of work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Host capability that runs a job later, on the host's own thread of
/// control.
///
/// Fire-and-forget: no cancellation, no timeout, no ordering guarantee
/// beyond whatever the host scheduler itself provides.
pub trait Scheduler: Send + Sync {
    /// Schedules `job` for later execution.
    ///
    /// # Errors
    /// Returns [`ScheduleError`] carrying the job back when the host
    /// facility is unavailable or refuses it; the caller decides what to do
    /// with the returned job (the bus runs it immediately).
    fn schedule(&self, job: Job) -> Result<(), ScheduleError>;
}

/// A job the scheduler could not accept, handed back to the caller.
///
/// Mirrors the channel-send idiom (`SendError(T)`) so the rejected work is
/// never lost.
pub struct ScheduleError(pub Job);

impl fmt::Debug for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScheduleError(..)")
    }
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("host scheduler rejected the job")
    }
}

impl std::error::Error for ScheduleError {}

/// Scheduler backed by a tokio runtime handle.
///
/// For hosts whose "next safe tick" is simply the async runtime's executor.
/// Enable with the `tokio-scheduler` feature.
#[cfg(feature = "tokio-scheduler")]
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "tokio-scheduler")]
impl TokioScheduler {
    /// Wraps an explicit runtime handle.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Captures the current runtime, if the caller is inside one.
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

#[cfg(feature = "tokio-scheduler")]
impl Scheduler for TokioScheduler {
    fn schedule(&self, job: Job) -> Result<(), ScheduleError> {
        self.handle.spawn(async move { job() });
        Ok(())
    }
}
