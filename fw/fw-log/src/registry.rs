//! Event handler registry.
//!
//! Holds the subscribed handlers in insertion order and fans each event out
//! to all of them.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::{DispatchReport, HandlerError};
use crate::event::LogEvent;

/// Identifier returned by [`EventHandlerRegistry::subscribe`].
///
/// Ids start at 1 and only grow. [`HandlerId::REJECTED`] (0) is never
/// assigned to a real subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u32);

impl HandlerId {
    /// Returned when a subscription was refused
    pub const REJECTED: HandlerId = HandlerId(0);

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_rejected(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A sink for log events.
///
/// Implemented for any `FnMut(&LogEvent) -> Result<(), HandlerError>`
/// closure, so most handlers are just closures.
pub trait LogEventHandler: Send {
    /// Handle one event. The event must not be retained past the call.
    fn handle(&mut self, event: &LogEvent<'_>) -> Result<(), HandlerError>;
}

impl<F> LogEventHandler for F
where
    F: FnMut(&LogEvent<'_>) -> Result<(), HandlerError> + Send,
{
    fn handle(&mut self, event: &LogEvent<'_>) -> Result<(), HandlerError> {
        self(event)
    }
}

struct Subscription {
    id: HandlerId,
    handler: Box<dyn LogEventHandler>,
}

/// Ordered list of subscribed handlers.
pub struct EventHandlerRegistry {
    subscriptions: Vec<Subscription>,
    /// Id handed out by the next successful subscribe, `None` once the id
    /// space is used up
    next_id: Option<u32>,
}

impl EventHandlerRegistry {
    pub const fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Subscribe a handler. It receives every event dispatched from now on.
    pub fn subscribe<H>(&mut self, handler: H) -> HandlerId
    where
        H: LogEventHandler + 'static,
    {
        self.subscribe_boxed(Some(Box::new(handler)))
    }

    /// Subscribe an optional handler.
    ///
    /// `None` is not an error: it returns [`HandlerId::REJECTED`] and leaves
    /// the registry untouched. The same happens once the id space is used up,
    /// since ids are never reused.
    pub fn subscribe_boxed(&mut self, handler: Option<Box<dyn LogEventHandler>>) -> HandlerId {
        let Some(handler) = handler else {
            return HandlerId::REJECTED;
        };
        let Some(raw) = self.next_id else {
            log::warn!("Log handler ids exhausted, subscription rejected");
            return HandlerId::REJECTED;
        };

        let id = HandlerId(raw);
        self.next_id = raw.checked_add(1);
        self.subscriptions.push(Subscription { id, handler });
        log::trace!("Subscribed log handler {id}");
        id
    }

    /// Remove the handler with `id`. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: HandlerId) {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|sub| sub.id != id);
        if self.subscriptions.len() != before {
            log::trace!("Unsubscribed log handler {id}");
        }
    }

    /// Deliver `event` to every handler, in subscription order.
    ///
    /// A handler returning an error does not stop the ones after it.
    pub fn dispatch(&mut self, event: &LogEvent<'_>) -> DispatchReport {
        let mut report = DispatchReport::default();
        for sub in self.subscriptions.iter_mut() {
            let result = sub.handler.handle(event);
            if let Err(err) = &result {
                log::warn!("Log handler {} failed: {err}", sub.id);
            }
            report.record(sub.id, result);
        }
        report
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.subscriptions.iter().any(|sub| sub.id == id)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Default for EventHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventHandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<HandlerId> = self.subscriptions.iter().map(|sub| sub.id).collect();
        f.debug_struct("EventHandlerRegistry")
            .field("subscriptions", &ids)
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Severity;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use chrono::{DateTime, Utc};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_sync::blocking_mutex::Mutex;
    use core::cell::RefCell;

    type Journal = Arc<Mutex<CriticalSectionRawMutex, RefCell<Vec<String>>>>;

    fn journal() -> Journal {
        Arc::new(Mutex::new(RefCell::new(Vec::new())))
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.lock(|j| j.borrow().clone())
    }

    /// Handler that appends `<name>:<message>` to the journal
    fn recorder(name: &'static str, journal: &Journal) -> impl LogEventHandler + use<> {
        let journal = journal.clone();
        move |event: &LogEvent<'_>| -> Result<(), HandlerError> {
            journal.lock(|j| j.borrow_mut().push(alloc::format!("{name}:{}", event.message)));
            Ok(())
        }
    }

    fn event(message: &str) -> LogEvent<'_> {
        let timestamp: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        LogEvent::new(timestamp, Severity::Info, "main.rs", 7, message)
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut registry = EventHandlerRegistry::new();
        let j = journal();
        let ids: Vec<HandlerId> = (0..5).map(|_| registry.subscribe(recorder("h", &j))).collect();

        assert!(ids.iter().all(|id| !id.is_rejected()));
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids[0].get(), 1);
    }

    #[test]
    fn test_empty_handler_rejected() {
        let mut registry = EventHandlerRegistry::new();
        let id = registry.subscribe_boxed(None);

        assert_eq!(id, HandlerId::REJECTED);
        assert_eq!(id.get(), 0);
        assert!(registry.is_empty());

        // the rejected slot did not consume an id
        let j = journal();
        assert_eq!(registry.subscribe(recorder("h", &j)).get(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_unsubscribe() {
        let mut registry = EventHandlerRegistry::new();
        let j = journal();
        let first = registry.subscribe(recorder("a", &j));
        registry.unsubscribe(first);
        let second = registry.subscribe(recorder("b", &j));
        assert!(second > first);
    }

    #[test]
    fn test_last_id_is_issued_then_exhausted() {
        let mut registry = EventHandlerRegistry::new();
        registry.next_id = Some(u32::MAX - 1);
        let j = journal();

        assert_eq!(registry.subscribe(recorder("a", &j)).get(), u32::MAX - 1);
        assert_eq!(registry.subscribe(recorder("b", &j)).get(), u32::MAX);
        assert!(registry.subscribe(recorder("c", &j)).is_rejected());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_dispatch_in_subscription_order() {
        let mut registry = EventHandlerRegistry::new();
        let j = journal();
        registry.subscribe(recorder("h1", &j));
        registry.subscribe(recorder("h2", &j));
        registry.subscribe(recorder("h3", &j));

        let report = registry.dispatch(&event("boot"));

        assert_eq!(entries(&j), vec!["h1:boot", "h2:boot", "h3:boot"]);
        assert_eq!(report.delivered, 3);
        assert!(report.is_ok());
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let mut registry = EventHandlerRegistry::new();
        let j = journal();
        let keep = registry.subscribe(recorder("keep", &j));
        let dropped = registry.subscribe(recorder("drop", &j));

        registry.unsubscribe(dropped);
        registry.unsubscribe(dropped);
        registry.unsubscribe(HandlerId::REJECTED);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(keep));
        assert!(!registry.contains(dropped));
    }

    #[test]
    fn test_removed_handler_is_silent() {
        let mut registry = EventHandlerRegistry::new();
        let j = journal();
        let id = registry.subscribe(recorder("gone", &j));
        registry.dispatch(&event("one"));
        registry.unsubscribe(id);
        registry.dispatch(&event("two"));

        assert_eq!(entries(&j), vec!["gone:one"]);
    }

    #[test]
    fn test_failing_handler_does_not_stop_dispatch() {
        let mut registry = EventHandlerRegistry::new();
        let j = journal();
        registry.subscribe(recorder("before", &j));
        let bad = registry.subscribe(|_: &LogEvent<'_>| -> Result<(), HandlerError> {
            Err(HandlerError::Rejected("link down".to_string()))
        });
        registry.subscribe(recorder("after", &j));

        let report = registry.dispatch(&event("x"));

        assert_eq!(entries(&j), vec!["before:x", "after:x"]);
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(
            report.first_failure,
            Some((bad, HandlerError::Rejected("link down".to_string())))
        );
    }
}
