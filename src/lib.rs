//! # tickbus
//!
//! **Tickbus** is a small in-process, name-keyed publish/subscribe bus with
//! deferred, failure-isolated dispatch.
//!
//! It decouples producers of named occurrences from consumers inside one
//! process: producers [`emit`](EventBus::emit), consumers
//! [`on`](EventBus::on)/[`once`](EventBus::once), and a panicking consumer
//! never reaches the producer or the rest of the listeners. A bridge layer
//! adapts an opaque host runtime's pushed occurrences into bus emissions,
//! and a one-shot readiness latch replays the host's bootstrap payload to
//! subscribers that arrive late.
//!
//! ## Architecture
//! ```text
//!   Host runtime (opaque)                      In-process consumers
//!   ┌─────────────────────┐                    ┌──────────────────────┐
//!   │ readiness signal ───┼──► latch ready ──► │ on("ready", ..)      │
//!   │                     │    (write-once,    │   late: deferred     │
//!   │ signal "a" ─────┐   │     retain payload)│   replay, detached   │
//!   │ signal "b" ─────┼───┼──► Bridge          └──────────────────────┘
//!   │ (absent: skip) ─┘   │    (fixed Binding
//!   │                     │     table, attach   ┌─────────────────────┐
//!   │ scheduler ──────────┼──►  once) ────────► │ EventBus            │
//!   └─────────────────────┘    "next safe tick" │  registry + once    │
//!                              (degrades to     │  bookkeeping        │
//!   emit(name, payload) ─────► immediate) ────► │  snapshot dispatch  │
//!                                               │  FailurePolicy      │
//!                                               └─────────────────────┘
//! ```
//!
//! ## Dispatch rules
//! - `emit` is synchronous: the snapshot taken at the start of the call runs
//!   to completion before it returns, in insertion order.
//! - Registry mutation from inside a listener (including re-entrant `emit`)
//!   affects later emissions only, never the active snapshot.
//! - A listener registered via `once` is removed *before* it runs, so a
//!   synchronous re-emit from its own body cannot re-enter it.
//! - Listener panics are caught at the dispatch boundary and routed to the
//!   bus's [`FailurePolicy`]; `emit` never surfaces them.
//! - Deferred work (readiness replay, the latch itself) goes through the
//!   injected [`Scheduler`]; without one, or when scheduling fails, it runs
//!   immediately.
//!
//! ## Features
//! | Area            | Description                                             | Key types / traits                  |
//! |-----------------|---------------------------------------------------------|-------------------------------------|
//! | **Subscribing** | Register, register-once, unsubscribe, bulk unsubscribe. | [`EventBus`], [`Subscription`]      |
//! | **Emitting**    | Snapshot dispatch with per-listener failure isolation.  | [`EventBus::emit`], [`Payload`]     |
//! | **Host bridge** | Forward host occurrences as bus events, attach once.    | [`HostRuntime`], [`Binding`]        |
//! | **Scheduling**  | "Next safe tick" capability with immediate fallback.    | [`Scheduler`], [`Job`]              |
//! | **Failures**    | Pluggable panic reporting, best-effort by contract.     | [`FailurePolicy`], [`LogFailures`]  |
//!
//! ## Optional features
//! - `tokio-scheduler`: exports `TokioScheduler`, a [`Scheduler`] backed by
//!   a tokio runtime handle.
//!
//! ## Example
//! ```rust
//! use tickbus::{listener, EventBus, Payload};
//!
//! let bus = EventBus::new();
//!
//! // A persistent subscriber and a one-shot one.
//! let tally = bus.on("block_broken", listener(|_p: &Payload| {
//!     // update stats...
//! }))?;
//! bus.once("block_broken", listener(|p: &Payload| {
//!     if let Some(kind) = p.downcast_ref::<&str>() {
//!         println!("first break: {kind}");
//!     }
//! }))?;
//!
//! bus.emit("block_broken", Payload::new("stone"))?;
//! bus.emit("block_broken", Payload::new("dirt"))?; // one-shot is gone
//!
//! tally.cancel();
//! # Ok::<(), tickbus::BusError>(())
//! ```
//!
//! Wiring to a host happens once, at the composition point: implement
//! [`HostRuntime`] for your embedding, declare the [`Binding`] table on the
//! builder, and call [`EventBus::attach`].

mod bus;
mod error;
mod events;
mod host;
mod policies;

// ---- Public re-exports ----

pub use bus::{listener, BusBuilder, EventBus, Listener, Subscription};
pub use error::BusError;
pub use events::{EventName, Payload};
pub use host::{Binding, HostRuntime, HostSignal, Job, ScheduleError, Scheduler, SignalHandler};
pub use policies::{FailurePolicy, LogFailures};

// Optional: scheduler backed by a tokio runtime.
// Enable with: `--features tokio-scheduler`
#[cfg(feature = "tokio-scheduler")]
pub use host::TokioScheduler;
