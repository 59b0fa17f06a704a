//! Marker configuration edge cases: the marker channel only opens when both
//! delimiter properties are configured.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use vellum::{
    ArgNode, Directive, DirectiveCall, EngineConfig, IncludeDirective, Location, MapContext,
    RenderError, Resource, ResourceLoader, RuntimeServices,
};

struct NothingLoader;

impl ResourceLoader for NothingLoader {
    fn get_content(&self, path: &str, _encoding: &str) -> Result<Resource, RenderError> {
        Err(RenderError::ResourceNotFound { path: path.into() })
    }
}

fn missing_arg_call() -> DirectiveCall {
    // $nothing never has a value, so the argument is recoverable and only
    // exercises the marker channel.
    DirectiveCall::new("include", Location::new("page.vm", 1, 1)).arg(ArgNode::Reference {
        name: "nothing".to_string(),
        location: Location::new("page.vm", 1, 10),
    })
}

fn render_with(config: EngineConfig) -> String {
    let services = RuntimeServices::new(Arc::new(NothingLoader)).with_config(config);
    let mut include = IncludeDirective::new();
    include.init(&services).expect("init should succeed");

    let mut context = MapContext::new();
    context.insert("_", "_");

    let mut output = String::new();
    include
        .render(&services, &context, &mut output, &missing_arg_call())
        .expect("a missing value is recoverable");
    output
}

#[test]
fn test_no_markers_no_output() {
    assert_eq!(render_with(EngineConfig::default()), "");
}

#[test]
fn test_one_marker_is_not_enough() {
    let mut config = EngineConfig::default();
    config.errormsg_start = Some("<!--".to_string());
    assert_eq!(render_with(config), "");

    let mut config = EngineConfig::default();
    config.errormsg_end = Some("-->".to_string());
    assert_eq!(render_with(config), "");
}

#[test]
fn test_empty_markers_still_open_the_channel() {
    // Configured-but-empty delimiters write the message with only the
    // padding spaces around it.
    let config = EngineConfig::new().with_error_markers("", "");
    assert_eq!(render_with(config), " error with arg 0 please see log. ");
}

#[test]
fn test_visible_markers_bracket_the_message() {
    let config = EngineConfig::new().with_error_markers("<!-- include error:", "-->");
    assert_eq!(
        render_with(config),
        "<!-- include error: error with arg 0 please see log. -->"
    );
}
