//! The bus itself: registries, subscriptions, and dispatch.
//!
//! ## Contents
//! - [`EventBus`], [`BusBuilder`] — the public operations and their wiring
//! - [`Subscription`] — idempotent unsubscribe handle
//! - [`Listener`], [`listener`] — the callback type and its constructor
//!
//! See `lib.rs` for the system-level wiring diagram.

pub(crate) mod core;
mod registry;
mod subscription;

pub use self::core::{BusBuilder, EventBus};
pub use registry::{listener, Listener};
pub use subscription::Subscription;
