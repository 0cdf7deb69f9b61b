//! # The bus core: registration, snapshot dispatch, readiness latch.
//!
//! [`EventBus`] decouples producers of named occurrences from consumers:
//! producers `emit`, consumers `on`/`once`, and neither side sees the other's
//! failures.
//!
//! ## Rules
//! - **Synchronous emit**: all listeners snapshotted for an event run to
//!   completion (or panic) before `emit` returns.
//! - **Snapshot dispatch**: the listener set is captured at the start of the
//!   call; registry mutation from inside a listener (subscribe, unsubscribe,
//!   re-entrant emit) only affects later emissions.
//! - **Failure isolation**: a panicking listener is reported to the
//!   [`FailurePolicy`] and the rest of the snapshot still runs; nothing
//!   propagates to the emitter.
//! - **Readiness latch**: the first firing of the host's readiness signal is
//!   latched with its payload. Subscribers to [`EventName::READY`] that
//!   arrive after the latch are *not* registered — they get one deferred,
//!   failure-isolated replay of the retained payload.
//!
//! ## Locking
//! One mutex guards the registry and the latch. It is held only to mutate or
//! snapshot, never across a listener invocation, so listeners may freely
//! call back into the bus. Poisoning is recovered because no user code ever
//! runs under the lock.
//!
//! ## Example
//! ```
//! use tickbus::{listener, EventBus, Payload};
//!
//! let bus = EventBus::new();
//! let sub = bus.on("chunk_loaded", listener(|p: &Payload| {
//!     if let Some(at) = p.downcast_ref::<(i32, i32)>() {
//!         println!("loaded {at:?}");
//!     }
//! }))?;
//!
//! bus.emit("chunk_loaded", Payload::new((4, -9)))?;
//! sub.cancel();
//! # Ok::<(), tickbus::BusError>(())
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::BusError;
use crate::events::{EventName, Payload};
use crate::host::{Binding, HostRuntime, Job, ScheduleError, Scheduler};
use crate::policies::{panic_message, FailurePolicy, LogFailures};

use super::registry::{Listener, Registry};
use super::subscription::Subscription;

/// Mutable bus state, guarded by [`Inner::state`].
struct State {
    registry: Registry,
    /// Write-once readiness latch with the retained payload.
    ready: Option<Payload>,
    host_attached: bool,
    bridge_attached: bool,
}

/// Shared core behind every [`EventBus`] clone and [`Subscription`] handle.
pub(crate) struct Inner {
    state: Mutex<State>,
    scheduler: Option<Arc<dyn Scheduler>>,
    failures: Arc<dyn FailurePolicy>,
    bindings: Vec<Binding>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot-and-dispatch for one event.
    pub(crate) fn emit_event(&self, event: &EventName, payload: &Payload) {
        let snapshot = self.lock().registry.snapshot(event);
        for l in &snapshot {
            self.safe_call(event, l, payload);
        }
    }

    /// Removes one listener (once-aware). Shared by `off`, wrapper
    /// self-removal, and [`Subscription::cancel`].
    pub(crate) fn remove(&self, event: &EventName, listener: &Listener) {
        self.lock().registry.remove(event, listener);
    }

    /// Invokes a listener behind the failure boundary.
    ///
    /// A panic is reduced to a message and handed to the failure policy; the
    /// policy call is guarded too, so a panicking policy cannot escape.
    pub(crate) fn safe_call(&self, event: &EventName, listener: &Listener, payload: &Payload) {
        if let Err(err) = panic::catch_unwind(AssertUnwindSafe(|| listener(payload))) {
            let reason = panic_message(err.as_ref());
            let policy = Arc::clone(&self.failures);
            let event = event.clone();
            let _ = panic::catch_unwind(AssertUnwindSafe(move || {
                policy.on_listener_panic(&event, &reason);
            }));
        }
    }

    /// Runs `job` on the host's next safe tick, or immediately when no
    /// scheduler is configured or the scheduler hands the job back.
    pub(crate) fn defer(&self, job: Job) {
        match &self.scheduler {
            Some(scheduler) => {
                if let Err(ScheduleError(job)) = scheduler.schedule(job) {
                    job();
                }
            }
            None => job(),
        }
    }

    /// Deferred, failure-isolated single invocation (readiness replay path).
    fn call_soon(self: &Arc<Self>, event: EventName, listener: Listener, payload: Payload) {
        let inner = Arc::clone(self);
        self.defer(Box::new(move || {
            inner.safe_call(&event, &listener, &payload);
        }));
    }

    /// Marks the bridge attached; `false` if it already was.
    pub(crate) fn try_mark_bridge_attached(&self) -> bool {
        let mut st = self.lock();
        if st.bridge_attached {
            return false;
        }
        st.bridge_attached = true;
        true
    }

    pub(crate) fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// First-firing half of the readiness protocol: latch the payload,
    /// attach the bridge, then emit [`EventName::Ready`] to current
    /// subscribers. Repeat firings are ignored here, inside the deferred
    /// job, so two quick host firings cannot double-latch.
    pub(crate) fn latch_ready(self: &Arc<Self>, host: &Arc<dyn HostRuntime>, payload: Payload) {
        {
            let mut st = self.lock();
            if st.ready.is_some() {
                return;
            }
            st.ready = Some(payload.clone());
        }
        crate::host::attach_bridge(self, host);
        self.emit_event(&EventName::Ready, &payload);
    }
}

/// In-process, name-keyed publish/subscribe bus.
///
/// Cheap to clone (clones share one registry). Construct a plain bus with
/// [`EventBus::new`], or use [`EventBus::builder`] to inject a scheduler, a
/// failure policy, and the host binding table. Expose a shared instance at
/// your composition point; the library deliberately has no global singleton.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

impl EventBus {
    /// Bus with defaults: no scheduler (deferred work runs immediately),
    /// [`LogFailures`], empty binding table.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a bus.
    pub fn builder() -> BusBuilder {
        BusBuilder::new()
    }

    /// Subscribes `listener` to `event`.
    ///
    /// Insertion is idempotent per listener identity. The returned
    /// [`Subscription`] removes exactly this pairing; dropping it without
    /// cancelling leaves the registration in place.
    ///
    /// Special case: subscribing to [`EventName::READY`] after readiness has
    /// latched does not register anything — the listener gets one deferred,
    /// failure-isolated replay of the retained payload and the returned
    /// handle is detached.
    ///
    /// # Errors
    /// [`BusError::EmptyEventName`] if `event` is empty.
    pub fn on(&self, event: &str, listener: Listener) -> Result<Subscription, BusError> {
        let event = EventName::parse(event)?;
        if let Some(retained) = self.check_ready_replay(&event) {
            self.inner.call_soon(event, listener, retained);
            return Ok(Subscription::detached());
        }
        self.inner.lock().registry.insert(&event, &listener);
        Ok(Subscription::active(&self.inner, event, listener))
    }

    /// Subscribes `listener` to a single firing of `event`.
    ///
    /// The registration is removed *before* the listener runs, so a
    /// synchronous re-emit from inside the listener cannot re-enter it.
    /// Removal — via the returned handle or [`EventBus::off`] — is keyed on
    /// the listener passed here, not on the internal wrapper.
    ///
    /// Same already-ready special case and same errors as [`EventBus::on`].
    pub fn once(&self, event: &str, listener: Listener) -> Result<Subscription, BusError> {
        let event = EventName::parse(event)?;
        if let Some(retained) = self.check_ready_replay(&event) {
            self.inner.call_soon(event, listener, retained);
            return Ok(Subscription::detached());
        }

        let weak = Arc::downgrade(&self.inner);
        let wrapper_event = event.clone();
        let original = listener.clone();
        let wrapper: Listener = Arc::new(move |payload: &Payload| {
            let Some(inner) = weak.upgrade() else { return };
            // Remove first: re-entrancy protection.
            inner.remove(&wrapper_event, &original);
            inner.safe_call(&wrapper_event, &original, payload);
        });

        self.inner
            .lock()
            .registry
            .insert_once(&event, &listener, &wrapper);
        Ok(Subscription::active(&self.inner, event, listener))
    }

    /// Unsubscribes one listener from `event`.
    ///
    /// Removes the plain registration if present; if `listener` was
    /// registered via [`EventBus::once`], removes the internal wrapper and
    /// its bookkeeping. Unknown listeners are a no-op, not an error.
    ///
    /// # Errors
    /// [`BusError::EmptyEventName`] if `event` is empty.
    pub fn off(&self, event: &str, listener: &Listener) -> Result<(), BusError> {
        let event = EventName::parse(event)?;
        self.inner.remove(&event, listener);
        Ok(())
    }

    /// Unsubscribes every listener (plain and once) from `event`.
    ///
    /// # Errors
    /// [`BusError::EmptyEventName`] if `event` is empty.
    pub fn off_all(&self, event: &str) -> Result<(), BusError> {
        let event = EventName::parse(event)?;
        self.inner.lock().registry.remove_all(&event);
        Ok(())
    }

    /// Emits `event` to every currently registered listener.
    ///
    /// Listeners run synchronously, in insertion order, from a snapshot
    /// taken at the moment of the call; each runs behind the failure
    /// boundary. With no listeners registered this is a cheap no-op.
    ///
    /// # Errors
    /// [`BusError::EmptyEventName`] if `event` is empty. Listener panics are
    /// never surfaced here.
    pub fn emit(&self, event: &str, payload: Payload) -> Result<(), BusError> {
        let event = EventName::parse(event)?;
        self.inner.emit_event(&event, &payload);
        Ok(())
    }

    /// Wires the bus to its host. Idempotent; call once at the composition
    /// point.
    ///
    /// Subscribes to the host's readiness signal. On its first firing
    /// (deferred to the next safe tick when a scheduler is configured) the
    /// bus latches readiness with the payload, attaches the host bridge, and
    /// emits [`EventName::READY`]. Later firings are ignored.
    pub fn attach(&self, host: Arc<dyn HostRuntime>) {
        {
            let mut st = self.inner.lock();
            if st.host_attached {
                return;
            }
            st.host_attached = true;
        }

        let weak = Arc::downgrade(&self.inner);
        let handler_host = Arc::clone(&host);
        host.readiness().subscribe(Box::new(move |payload: Payload| {
            let Some(inner) = weak.upgrade() else { return };
            let host = Arc::clone(&handler_host);
            let latch = Arc::clone(&inner);
            inner.defer(Box::new(move || {
                latch.latch_ready(&host, payload);
            }));
        }));
    }

    /// `true` once the host's readiness signal has fired and latched.
    pub fn is_ready(&self) -> bool {
        self.inner.lock().ready.is_some()
    }

    /// Retained readiness payload to replay, if `event` is the readiness
    /// event and the latch is set.
    fn check_ready_replay(&self, event: &EventName) -> Option<Payload> {
        if !event.is_ready() {
            return None;
        }
        self.inner.lock().ready.clone()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

/// Configures and builds an [`EventBus`].
///
/// ## Example
/// ```
/// use std::sync::Arc;
/// use tickbus::{Binding, EventBus, LogFailures};
///
/// let bus = EventBus::builder()
///     .with_binding(Binding::new("block_broken", "world.block_broken")?)
///     .with_failure_policy(Arc::new(LogFailures))
///     .build();
/// # Ok::<(), tickbus::BusError>(())
/// ```
pub struct BusBuilder {
    bindings: Vec<Binding>,
    scheduler: Option<Arc<dyn Scheduler>>,
    failures: Arc<dyn FailurePolicy>,
}

impl BusBuilder {
    fn new() -> Self {
        Self {
            bindings: Vec::new(),
            scheduler: None,
            failures: Arc::new(LogFailures),
        }
    }

    /// Adds one (bus event ← host signal) binding to the bridge table.
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Adds several bindings to the bridge table.
    pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = Binding>) -> Self {
        self.bindings.extend(bindings);
        self
    }

    /// Injects the host's deferred-execution capability. Without one,
    /// deferred work degrades to immediate execution.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Replaces the listener-failure policy (default: [`LogFailures`]).
    pub fn with_failure_policy(mut self, policy: Arc<dyn FailurePolicy>) -> Self {
        self.failures = policy;
        self
    }

    /// Builds the bus. The binding table is frozen from here on.
    pub fn build(self) -> EventBus {
        EventBus {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    registry: Registry::new(),
                    ready: None,
                    host_attached: false,
                    bridge_attached: false,
                }),
                scheduler: self.scheduler,
                failures: self.failures,
                bindings: self.bindings,
            }),
        }
    }
}
