//! Runtime services consumed by directives
//!
//! [`RuntimeServices`] is the slice of the engine a directive needs at
//! render time: the resource loader, the registered event listeners, the
//! include-event handler chain and the configuration. It is deliberately
//! thin; resource caching, parser pools and the rest of a full engine stay
//! outside this crate.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::context::Context;
use crate::error::{BoxError, RenderError};
use crate::event::{EventBroadcaster, Listener};
use crate::resource::{Resource, ResourceLoader};

/// Host hook that may rewrite or veto an include target.
///
/// Handlers run in registration order, each seeing the path produced by the
/// previous one. Returning `Ok(None)` blocks the inclusion; blocking is a
/// successful outcome, not an error. Handler errors are wrapped into
/// [`RenderError::Processing`] with the original cause attached.
pub trait IncludeEventHandler {
    fn include_event(
        &self,
        context: &dyn Context,
        path: &str,
        current_template: Option<&str>,
        directive: &str,
    ) -> Result<Option<String>, BoxError>;
}

/// Engine services available to a rendering directive
pub struct RuntimeServices {
    loader: Arc<dyn ResourceLoader>,
    include_handlers: Vec<Arc<dyn IncludeEventHandler>>,
    listeners: Vec<Arc<dyn Listener>>,
    config: EngineConfig,
}

impl RuntimeServices {
    /// Create services around a resource loader with default configuration
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            loader,
            include_handlers: Vec::new(),
            listeners: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Append an include-event handler to the chain
    pub fn add_include_handler(&mut self, handler: Arc<dyn IncludeEventHandler>) {
        self.include_handlers.push(handler);
    }

    /// Register an event listener.
    ///
    /// Listeners with an empty [`Listener::targets`] receive every event;
    /// the rest are filtered per source when a broadcaster is built.
    pub fn add_listener(&mut self, listener: Arc<dyn Listener>) {
        self.listeners.push(listener);
    }

    /// Current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Encoding handed to the loader on every fetch
    pub fn input_encoding(&self) -> &str {
        &self.config.input_encoding
    }

    /// Fetch a resource through the loader contract
    pub fn get_content(&self, path: &str, encoding: &str) -> Result<Resource, RenderError> {
        self.loader.get_content(path, encoding)
    }

    /// Build the broadcaster for one event source.
    ///
    /// The registered listeners are partitioned into the global collection
    /// (empty target list) and the collection targeted at `source`;
    /// listeners targeting other sources are excluded.
    pub fn broadcaster_for(&self, source: &str) -> EventBroadcaster {
        let mut global = Vec::new();
        let mut targeted = Vec::new();
        for listener in &self.listeners {
            let targets = listener.targets();
            if targets.is_empty() {
                global.push(Arc::clone(listener));
            } else if targets.iter().any(|t| t == source) {
                targeted.push(Arc::clone(listener));
            }
        }
        EventBroadcaster::new(source, global, targeted)
    }

    /// Run the interception hook for one candidate include path.
    ///
    /// Listeners registered for the directive observe the candidate path
    /// first; the handler chain then gets a chance to rewrite or block it.
    /// `Ok(None)` means the host vetoed the inclusion.
    pub fn include_event(
        &self,
        context: &dyn Context,
        path: &str,
        current_template: Option<&str>,
        directive: &str,
    ) -> Result<Option<String>, RenderError> {
        let broadcaster = self.broadcaster_for(directive);
        if broadcaster.has_listeners() {
            broadcaster.notify(path)?;
        }

        let mut current = path.to_string();
        for handler in &self.include_handlers {
            match handler
                .include_event(context, &current, current_template, directive)
                .map_err(|cause| {
                    RenderError::processing(
                        format!("include event handler failed for '{}'", current),
                        cause,
                    )
                })? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MapContext;
    use crate::event::Event;
    use std::sync::Mutex;

    struct EmptyLoader;

    impl ResourceLoader for EmptyLoader {
        fn get_content(&self, path: &str, _encoding: &str) -> Result<Resource, RenderError> {
            Err(RenderError::ResourceNotFound { path: path.into() })
        }
    }

    struct Rewriter {
        from: &'static str,
        to: &'static str,
    }

    impl IncludeEventHandler for Rewriter {
        fn include_event(
            &self,
            _context: &dyn Context,
            path: &str,
            _current_template: Option<&str>,
            _directive: &str,
        ) -> Result<Option<String>, BoxError> {
            if path == self.from {
                Ok(Some(self.to.to_string()))
            } else {
                Ok(Some(path.to_string()))
            }
        }
    }

    struct Blocker;

    impl IncludeEventHandler for Blocker {
        fn include_event(
            &self,
            _context: &dyn Context,
            _path: &str,
            _current_template: Option<&str>,
            _directive: &str,
        ) -> Result<Option<String>, BoxError> {
            Ok(None)
        }
    }

    struct FailingHandler;

    impl IncludeEventHandler for FailingHandler {
        fn include_event(
            &self,
            _context: &dyn Context,
            _path: &str,
            _current_template: Option<&str>,
            _directive: &str,
        ) -> Result<Option<String>, BoxError> {
            Err("host hook exploded".into())
        }
    }

    fn services() -> RuntimeServices {
        RuntimeServices::new(Arc::new(EmptyLoader))
    }

    #[test]
    fn test_include_event_without_handlers_passes_path_through() {
        let ctx = MapContext::new();
        let result = services()
            .include_event(&ctx, "a.vm", Some("t.vm"), "include")
            .expect("no handlers should not fail");
        assert_eq!(result.as_deref(), Some("a.vm"));
    }

    #[test]
    fn test_handlers_chain_in_order() {
        let mut services = services();
        services.add_include_handler(Arc::new(Rewriter {
            from: "a.vm",
            to: "b.vm",
        }));
        services.add_include_handler(Arc::new(Rewriter {
            from: "b.vm",
            to: "c.vm",
        }));

        let ctx = MapContext::new();
        let result = services
            .include_event(&ctx, "a.vm", None, "include")
            .expect("chain should succeed");
        assert_eq!(result.as_deref(), Some("c.vm"));
    }

    #[test]
    fn test_blocking_stops_the_chain() {
        let mut services = services();
        services.add_include_handler(Arc::new(Blocker));
        services.add_include_handler(Arc::new(Rewriter {
            from: "a.vm",
            to: "b.vm",
        }));

        let ctx = MapContext::new();
        let result = services
            .include_event(&ctx, "a.vm", None, "include")
            .expect("blocking is not an error");
        assert_eq!(result, None);
    }

    #[test]
    fn test_handler_error_is_wrapped_with_cause() {
        let mut services = services();
        services.add_include_handler(Arc::new(FailingHandler));

        let ctx = MapContext::new();
        let err = services
            .include_event(&ctx, "a.vm", None, "include")
            .unwrap_err();
        match err {
            RenderError::Processing { message, source } => {
                assert!(message.contains("a.vm"));
                assert_eq!(source.to_string(), "host hook exploded");
            }
            other => panic!("expected Processing, got {:?}", other),
        }
    }

    #[test]
    fn test_broadcaster_partitions_listeners() {
        struct Tagged {
            targets: Vec<String>,
            seen: Arc<Mutex<Vec<String>>>,
            label: &'static str,
        }
        impl Listener for Tagged {
            fn targets(&self) -> Vec<String> {
                self.targets.clone()
            }
            fn handle(&self, _event: &Event) -> Result<(), RenderError> {
                self.seen.lock().unwrap().push(self.label.to_string());
                Ok(())
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut services = services();
        services.add_listener(Arc::new(Tagged {
            targets: vec!["parse".to_string()],
            seen: Arc::clone(&seen),
            label: "other",
        }));
        services.add_listener(Arc::new(Tagged {
            targets: Vec::new(),
            seen: Arc::clone(&seen),
            label: "global",
        }));
        services.add_listener(Arc::new(Tagged {
            targets: vec!["include".to_string()],
            seen: Arc::clone(&seen),
            label: "targeted",
        }));

        let broadcaster = services.broadcaster_for("include");
        broadcaster.notify("x").expect("notify should succeed");

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["global".to_string(), "targeted".to_string()]
        );
    }

    #[test]
    fn test_loader_is_reachable_through_services() {
        let err = services().get_content("gone.vm", "UTF-8").unwrap_err();
        assert!(matches!(err, RenderError::ResourceNotFound { .. }));
    }
}
