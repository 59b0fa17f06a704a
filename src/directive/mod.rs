//! Built-in rendering directives
//!
//! A directive is a rendering construct invoked during template execution.
//! This module carries the contract plus the one directive this crate
//! implements, [`IncludeDirective`].

mod include;

pub use include::{IncludeDirective, IncludeOutcome};

use crate::context::Context;
use crate::error::RenderError;
use crate::output::Output;
use crate::runtime::RuntimeServices;
use crate::syntax::DirectiveCall;

/// Contract every rendering directive implements
pub trait Directive {
    /// Name the directive is invoked under, e.g. `include`
    fn name(&self) -> &str;

    /// One-time initialization against the runtime configuration
    fn init(&mut self, services: &RuntimeServices) -> Result<(), RenderError> {
        let _ = services;
        Ok(())
    }

    /// Render one invocation into the output sink.
    ///
    /// Returns `true` when the directive rendered successfully.
    fn render(
        &self,
        services: &RuntimeServices,
        context: &dyn Context,
        output: &mut dyn Output,
        node: &DirectiveCall,
    ) -> Result<bool, RenderError>;
}
