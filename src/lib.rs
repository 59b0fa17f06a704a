//! Vellum - runtime include resolution for text templating engines
//!
//! This library implements the machinery behind a template `#include()`
//! directive: evaluating arguments, letting the host intercept or veto the
//! target path, resolving relative paths against the resource currently
//! being rendered, fetching content through a pluggable loader contract,
//! and reporting failures with precise source locations.
//!
//! Parsing, compilation, expression evaluation and the loader
//! implementations live in the embedding engine; this crate consumes their
//! contracts.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vellum::{
//!     ArgNode, Directive, DirectiveCall, IncludeDirective, LoaderKind, Location,
//!     MapContext, RenderError, Resource, ResourceLoader, RuntimeServices,
//! };
//!
//! struct OneFile;
//!
//! impl ResourceLoader for OneFile {
//!     fn get_content(&self, path: &str, _encoding: &str) -> Result<Resource, RenderError> {
//!         match path {
//!             "header.vm" => Ok(Resource::new(path, "<h1>hello</h1>", LoaderKind::File)),
//!             _ => Err(RenderError::ResourceNotFound { path: path.into() }),
//!         }
//!     }
//! }
//!
//! let services = RuntimeServices::new(Arc::new(OneFile));
//! let mut include = IncludeDirective::new();
//! include.init(&services).unwrap();
//!
//! let call = DirectiveCall::new("include", Location::new("page.vm", 1, 1)).arg(
//!     ArgNode::StringLiteral {
//!         value: "header.vm".into(),
//!         location: Location::new("page.vm", 1, 10),
//!     },
//! );
//!
//! let context = MapContext::new();
//! let mut output = String::new();
//! include.render(&services, &context, &mut output, &call).unwrap();
//! assert_eq!(output, "<h1>hello</h1>");
//! ```

pub mod config;
pub mod context;
pub mod directive;
pub mod error;
pub mod event;
pub mod location;
pub mod output;
pub mod resource;
pub mod runtime;
pub mod syntax;

pub use config::{ConfigError, EngineConfig};
pub use context::{
    Context, ContextError, ContextScope, ContextStack, MapContext, ResourceAware, SharedContext,
    Value,
};
pub use directive::{Directive, IncludeDirective, IncludeOutcome};
pub use error::{BoxError, RenderError};
pub use event::{Event, EventBroadcaster, Listener, ListenerScope};
pub use location::{format_location, Location};
pub use output::{IoOutput, Output};
pub use resource::{LoaderKind, Resource, ResourceLoader};
pub use runtime::{IncludeEventHandler, RuntimeServices};
pub use syntax::{ArgNode, DirectiveCall};
