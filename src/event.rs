//! Engine events and the broadcast primitive
//!
//! Hosts observe in-flight operations by registering [`Listener`]s with the
//! runtime. For one event source an [`EventBroadcaster`] holds the ordered
//! registrations and delivers each constructed [`Event`] synchronously, on
//! the caller's thread. Listener failures are not caught here; the first
//! error aborts delivery and propagates to whoever called [`notify`].
//!
//! [`notify`]: EventBroadcaster::notify

use std::sync::Arc;

use crate::error::RenderError;

/// Immutable (source, message) pair delivered to listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    source: String,
    message: String,
}

impl Event {
    /// Build an event for a source identity
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
        }
    }

    /// Identity of the component that raised the event
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Message payload
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A host-registered event consumer
pub trait Listener {
    /// Source names this listener wants events from.
    ///
    /// An empty list registers the listener for every source.
    fn targets(&self) -> Vec<String> {
        Vec::new()
    }

    /// Handle one event. Errors propagate to the notifying caller.
    fn handle(&self, event: &Event) -> Result<(), RenderError>;
}

/// Whether a registration was made for everything or for one source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerScope {
    /// Receives every event regardless of source
    Global,
    /// Pre-filtered to this broadcaster's source at registration time
    Targeted,
}

struct Registration {
    scope: ListenerScope,
    listener: Arc<dyn Listener>,
}

/// Ordered delivery of events for a single source identity.
///
/// Constructed from the two listener collections the runtime maintains:
/// listeners registered for everything and listeners registered for this
/// source. Delivery order is all global listeners first, then all targeted
/// listeners, each in registration order.
pub struct EventBroadcaster {
    source: String,
    registrations: Vec<Registration>,
}

impl EventBroadcaster {
    /// Build a broadcaster from the global and targeted collections
    pub fn new(
        source: impl Into<String>,
        global: Vec<Arc<dyn Listener>>,
        targeted: Vec<Arc<dyn Listener>>,
    ) -> Self {
        let mut registrations = Vec::with_capacity(global.len() + targeted.len());
        registrations.extend(global.into_iter().map(|listener| Registration {
            scope: ListenerScope::Global,
            listener,
        }));
        registrations.extend(targeted.into_iter().map(|listener| Registration {
            scope: ListenerScope::Targeted,
            listener,
        }));
        Self {
            source: source.into(),
            registrations,
        }
    }

    /// Whether any listener is registered at all
    pub fn has_listeners(&self) -> bool {
        !self.registrations.is_empty()
    }

    /// Construct an [`Event`] and deliver it to every registration in order.
    ///
    /// Synchronous and unguarded: a failing listener aborts delivery and the
    /// error reaches the caller.
    pub fn notify(&self, message: &str) -> Result<(), RenderError> {
        let event = Event::new(self.source.clone(), message);
        for registration in &self.registrations {
            registration.listener.handle(&event)?;
        }
        Ok(())
    }

    /// Scopes in delivery order, mainly for diagnostics
    pub fn scopes(&self) -> impl Iterator<Item = ListenerScope> + '_ {
        self.registrations.iter().map(|r| r.scope)
    }
}
