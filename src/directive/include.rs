//! The `#include()` directive
//!
//! Renders zero or more arguments of either string-literal or reference
//! kind, fetching each named resource through the loader contract and
//! writing its content verbatim to the output sink, with no separator
//! between arguments.
//!
//! By default a problem writes nothing into the render stream. Configuring
//! both `errormsg_start` and `errormsg_end` makes the directive bracket a
//! short message for the failing argument; HTML comment markers are a good
//! choice when rendering markup. The marker channel is independent of error
//! propagation: a fatal failure can both mark the output and raise.

use tracing::error;

use crate::context::Context;
use crate::directive::Directive;
use crate::error::RenderError;
use crate::output::Output;
use crate::runtime::RuntimeServices;
use crate::syntax::{ArgNode, DirectiveCall};

/// Result of rendering a single include argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeOutcome {
    /// The resource was fetched and written to the sink
    Included,
    /// The interception hook vetoed the inclusion; nothing was written.
    /// Blocking is expected behavior and counts as success.
    Blocked,
    /// The argument was absent or evaluated to nothing; logged, recoverable
    Missing,
}

/// Directive handling `#include()` invocations.
///
/// Takes any number of arguments, e.g. `#include('foo.vm' 'bar.vm' $ref)`,
/// and renders every one that is appropriate. A missing value only skips
/// that argument; an argument of any other node kind aborts the whole call.
pub struct IncludeDirective {
    msg_start: Option<String>,
    msg_end: Option<String>,
}

impl Default for IncludeDirective {
    fn default() -> Self {
        Self::new()
    }
}

impl IncludeDirective {
    /// Create an include directive; markers are picked up in [`Directive::init`]
    pub fn new() -> Self {
        Self {
            msg_start: None,
            msg_end: None,
        }
    }

    /// Render one argument: evaluate, intercept, resolve, fetch, write.
    ///
    /// `Missing` outcomes are logged and recoverable; loader and hook
    /// failures propagate as errors after being logged with the call site.
    fn render_output(
        &self,
        node: Option<&ArgNode>,
        services: &RuntimeServices,
        context: &dyn Context,
        output: &mut dyn Output,
        call: &DirectiveCall,
    ) -> Result<IncludeOutcome, RenderError> {
        let Some(node) = node else {
            error!("#include() null argument");
            return Ok(IncludeOutcome::Missing);
        };

        let Some(value) = node.evaluate(context) else {
            error!("#include() null argument");
            return Ok(IncludeOutcome::Missing);
        };

        let source_path = value.to_string();

        // The ambient resource names the template currently being rendered;
        // fall back to the call site's own template name.
        let current_resource = context
            .as_resource_aware()
            .and_then(|aware| aware.current_resource());
        let current_template = current_resource
            .as_ref()
            .map(|r| r.name().to_string())
            .or_else(|| call.location.template_name().map(str::to_string));

        let arg = services
            .include_event(context, &source_path, current_template.as_deref(), self.name())
            .map_err(|err| {
                error!(
                    "#include(): event handling failed for '{}', called at {}: {}",
                    source_path, call.location, err
                );
                err
            })?;

        let Some(arg) = arg else {
            return Ok(IncludeOutcome::Blocked);
        };

        let resolved = make_path_relative(context, &arg);

        let resource = match services.get_content(&resolved, services.input_encoding()) {
            Ok(resource) => resource,
            Err(err @ RenderError::ResourceNotFound { .. }) => {
                error!(
                    "#include(): cannot find resource '{}', called at {}",
                    resolved, call.location
                );
                return Err(err);
            }
            Err(err) => {
                error!(
                    "#include(): arg = '{}', called at {}",
                    resolved, call.location
                );
                return Err(err);
            }
        };

        output.write_str(resource.content())?;
        Ok(IncludeOutcome::Included)
    }

    /// Bracket a message into the render stream, but only when both markers
    /// were configured at init. Mainly used for end-user template debugging.
    fn output_error(&self, output: &mut dyn Output, msg: &str) -> Result<(), RenderError> {
        if let (Some(start), Some(end)) = (&self.msg_start, &self.msg_end) {
            output.write_str(start)?;
            output.write_str(msg)?;
            output.write_str(end)?;
        }
        Ok(())
    }
}

impl Directive for IncludeDirective {
    fn name(&self) -> &str {
        "include"
    }

    fn init(&mut self, services: &RuntimeServices) -> Result<(), RenderError> {
        let config = services.config();
        // Pad with single spaces once so every write does not have to.
        self.msg_start = config.errormsg_start.as_ref().map(|s| format!("{} ", s));
        self.msg_end = config.errormsg_end.as_ref().map(|s| format!(" {}", s));
        Ok(())
    }

    fn render(
        &self,
        services: &RuntimeServices,
        context: &dyn Context,
        output: &mut dyn Output,
        node: &DirectiveCall,
    ) -> Result<bool, RenderError> {
        for (i, arg) in node.args.iter().enumerate() {
            match arg {
                ArgNode::StringLiteral { .. } | ArgNode::Reference { .. } => {
                    match self.render_output(Some(arg), services, context, output, node) {
                        Ok(IncludeOutcome::Included) | Ok(IncludeOutcome::Blocked) => {}
                        Ok(IncludeOutcome::Missing) => {
                            self.output_error(
                                output,
                                &format!("error with arg {} please see log.", i),
                            )?;
                        }
                        Err(err) => {
                            self.output_error(
                                output,
                                &format!("error with arg {} please see log.", i),
                            )?;
                            return Err(err);
                        }
                    }
                }
                // A malformed argument terminates the whole call, it does
                // not merely skip that argument.
                ArgNode::Other { text, .. } => {
                    error!(
                        "invalid #include() argument '{}' at {}",
                        text, node.location
                    );
                    self.output_error(output, &format!("error with arg {} please see log.", i))?;
                    return Err(RenderError::InvalidArgument {
                        arg: text.clone(),
                        location: node.location.to_string(),
                    });
                }
            }
        }

        Ok(true)
    }
}

/// Resolve an include path relative to the resource currently being
/// rendered.
///
/// A path that already starts with a separator is used as given. Otherwise,
/// when the context exposes a current resource, the directory portion of
/// that resource's name is prepended; the split uses `/` for classpath
/// resources and the platform separator for everything else.
fn make_path_relative(context: &dyn Context, path: &str) -> String {
    let clean = path.trim();

    if clean.starts_with('/') || clean.starts_with(std::path::MAIN_SEPARATOR) {
        return path.to_string();
    }

    if let Some(aware) = context.as_resource_aware() {
        if let Some(current) = aware.current_resource() {
            let name = current.name().trim();
            let separator = current.loader().path_separator();
            if let Some(sep_index) = name.rfind(separator) {
                if sep_index > 0 {
                    return format!("{}{}", &name[..=sep_index], clean);
                }
            }
        }
    }

    path.to_string()
}
