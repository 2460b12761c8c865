// src/events/bus/event_bus.rs
//
// Core event bus implementation.
//
// Handlers execute synchronously, in subscription order, on the emitting
// thread. Every emission is logged. A panicking handler never takes down
// the emitter or the remaining handlers.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler function.
/// Downcasts to the concrete event type inside.
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// The central coordination point for domain events. Services emit and
/// subscribe without direct dependencies on each other.
pub struct EventBus {
    /// Map from event TypeId to list of handlers
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,

    /// Event emission log (for debugging)
    event_log: Arc<RwLock<Vec<EventLogEntry>>>,
}

/// A logged emission for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to a specific event type.
    ///
    /// Handlers run in the order they were subscribed.
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap();
        handlers
            .entry(TypeId::of::<E>())
            .or_insert_with(Vec::new)
            .push(wrapped);
    }

    /// Emit an event: log it, then run each handler for its type.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap();
        let event_handlers = handlers.get(&TypeId::of::<E>());
        let handler_count = event_handlers.map(|h| h.len()).unwrap_or(0);

        {
            let mut event_log = self.event_log.write().unwrap();
            event_log.push(EventLogEntry {
                event_type: event.event_type().to_string(),
                event_id: event.event_id().to_string(),
                occurred_at: event.occurred_at().to_rfc3339(),
                handler_count,
            });
        }

        if let Some(event_handlers) = event_handlers {
            for handler in event_handlers {
                let result = catch_unwind(AssertUnwindSafe(|| handler(&event)));
                if result.is_err() {
                    log::error!("Event handler panicked for {}", event.event_type());
                }
            }
        }
    }

    /// Snapshot of the emission log
    pub fn event_log(&self) -> Vec<EventLogEntry> {
        self.event_log.read().unwrap().clone()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReviewRole;
    use crate::events::types::ReviewSubmitted;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribe_and_emit() {
        let bus = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_clone = Arc::clone(&seen);
        bus.subscribe::<ReviewSubmitted, _>(move |_event| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(ReviewSubmitted::new(
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4(),
            ReviewRole::Consultant,
        ));

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(bus.event_log().len(), 1);
        assert_eq!(bus.event_log()[0].handler_count, 1);
    }

    #[test]
    fn test_emit_without_subscribers_is_logged() {
        let bus = EventBus::new();
        bus.emit(ReviewSubmitted::new(
            uuid::Uuid::new_v4(),
            uuid::Uuid::new_v4(),
            ReviewRole::Oversight,
        ));

        assert_eq!(bus.event_log().len(), 1);
        assert_eq!(bus.event_log()[0].handler_count, 0);
    }
}
