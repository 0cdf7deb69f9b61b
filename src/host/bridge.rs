//! # The host bridge.
//!
//! The bridge adapts host-pushed occurrences into bus emissions: for each
//! [`Binding`] in the table frozen at bus construction, it looks up the host
//! signal by key and subscribes one forwarding handler that re-emits the
//! bound bus event with the host's raw payload, unchanged.
//!
//! ## Rules
//! - Attachment happens at most once per bus, and only after the readiness
//!   latch is set (the latch drives it).
//! - A signal the host does not produce is skipped with a debug note — the
//!   occurrence simply never happens on this host. Signals that appear later
//!   do not re-trigger attachment.
//! - Forwarding handlers hold only a weak reference to the bus.

use std::sync::{Arc, Weak};

use crate::bus::core::Inner;
use crate::error::BusError;
use crate::events::{EventName, Payload};

use super::runtime::HostRuntime;

/// One (bus event ← host signal) pair in the bridge table.
#[derive(Clone, Debug)]
pub struct Binding {
    /// Bus event the occurrence is re-emitted as.
    pub event: EventName,
    /// Host-side signal key, opaque to the bus.
    pub signal: String,
}

impl Binding {
    /// Builds a binding, validating the bus-side event name.
    ///
    /// # Errors
    /// [`BusError::EmptyEventName`] if `event` is empty.
    pub fn new(event: &str, signal: impl Into<String>) -> Result<Self, BusError> {
        Ok(Self {
            event: EventName::parse(event)?,
            signal: signal.into(),
        })
    }
}

/// Wires the binding table to the host. Once per bus; repeat calls return
/// immediately.
pub(crate) fn attach_bridge(inner: &Arc<Inner>, host: &Arc<dyn HostRuntime>) {
    if !inner.try_mark_bridge_attached() {
        return;
    }

    for binding in inner.bindings() {
        let Some(signal) = host.signal(&binding.signal) else {
            log::debug!(
                "host signal {:?} unavailable; skipping binding for {}",
                binding.signal,
                binding.event
            );
            continue;
        };

        let weak: Weak<Inner> = Arc::downgrade(inner);
        let event = binding.event.clone();
        signal.subscribe(Box::new(move |payload: Payload| {
            if let Some(inner) = weak.upgrade() {
                inner.emit_event(&event, &payload);
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::bus::{listener, EventBus};
    use crate::host::{HostSignal, SignalHandler};

    #[derive(Default)]
    struct ManualSignal {
        handlers: Mutex<Vec<SignalHandler>>,
    }

    impl ManualSignal {
        fn fire(&self, payload: Payload) {
            let handlers = self.handlers.lock().unwrap();
            for h in handlers.iter() {
                h(payload.clone());
            }
        }

        fn handler_count(&self) -> usize {
            self.handlers.lock().unwrap().len()
        }
    }

    impl HostSignal for ManualSignal {
        fn subscribe(&self, handler: SignalHandler) {
            self.handlers.lock().unwrap().push(handler);
        }
    }

    /// Host with a readiness signal plus a keyed map of ordinary signals.
    #[derive(Default)]
    struct FakeHost {
        readiness: Arc<ManualSignal>,
        signals: HashMap<String, Arc<ManualSignal>>,
    }

    impl FakeHost {
        fn with_signal(mut self, key: &str) -> Self {
            self.signals.insert(key.to_string(), Arc::default());
            self
        }
    }

    impl HostRuntime for FakeHost {
        fn readiness(&self) -> Arc<dyn HostSignal> {
            Arc::clone(&self.readiness) as Arc<dyn HostSignal>
        }

        fn signal(&self, key: &str) -> Option<Arc<dyn HostSignal>> {
            self.signals
                .get(key)
                .map(|s| Arc::clone(s) as Arc<dyn HostSignal>)
        }
    }

    fn ready_host(bus: &EventBus, host: &Arc<FakeHost>) {
        bus.attach(Arc::clone(host) as Arc<dyn HostRuntime>);
        host.readiness.fire(Payload::empty());
    }

    #[test]
    fn test_bridge_forwards_host_payload_unchanged() {
        let host = Arc::new(FakeHost::default().with_signal("world.item_use"));
        let bus = EventBus::builder()
            .with_binding(Binding::new("item_use", "world.item_use").unwrap())
            .build();

        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&seen);
        bus.on(
            "item_use",
            listener(move |p| {
                sink.lock()
                    .unwrap()
                    .push(p.downcast_ref::<String>().unwrap().clone());
            }),
        )
        .unwrap();

        ready_host(&bus, &host);
        host.signals["world.item_use"].fire(Payload::new(String::from("torch")));
        assert_eq!(*seen.lock().unwrap(), vec!["torch".to_string()]);
    }

    #[test]
    fn test_bridge_waits_for_readiness() {
        let host = Arc::new(FakeHost::default().with_signal("world.join"));
        let bus = EventBus::builder()
            .with_binding(Binding::new("player_join", "world.join").unwrap())
            .build();

        bus.attach(Arc::clone(&host) as Arc<dyn HostRuntime>);
        assert_eq!(host.signals["world.join"].handler_count(), 0);

        host.readiness.fire(Payload::empty());
        assert_eq!(host.signals["world.join"].handler_count(), 1);
    }

    #[test]
    fn test_absent_host_signal_is_skipped() {
        let host = Arc::new(FakeHost::default().with_signal("world.join"));
        let bus = EventBus::builder()
            .with_bindings([
                Binding::new("player_join", "world.join").unwrap(),
                Binding::new("entity_spawn", "world.spawn").unwrap(), // not produced
            ])
            .build();

        let hits = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&hits);
        bus.on(
            "player_join",
            listener(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

        ready_host(&bus, &host);
        host.signals["world.join"].fire(Payload::empty());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_repeated_readiness_does_not_reattach() {
        let host = Arc::new(FakeHost::default().with_signal("world.join"));
        let bus = EventBus::builder()
            .with_binding(Binding::new("player_join", "world.join").unwrap())
            .build();

        ready_host(&bus, &host);
        host.readiness.fire(Payload::empty());
        assert_eq!(host.signals["world.join"].handler_count(), 1);
    }

    #[test]
    fn test_binding_rejects_empty_event_name() {
        assert_eq!(
            Binding::new("", "world.join").unwrap_err(),
            BusError::EmptyEventName
        );
    }
}
