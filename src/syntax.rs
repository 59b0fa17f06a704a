//! Syntax-node contract consumed by directives
//!
//! Parsing and compilation happen upstream; directives only see a
//! [`DirectiveCall`] with its argument children already classified into the
//! [`ArgNode`] variants. Matching on the enum is exhaustive, so there is no
//! untagged fallthrough class of argument.

use crate::context::{Context, Value};
use crate::location::Location;

/// One argument child of a directive call
#[derive(Debug, Clone, PartialEq)]
pub enum ArgNode {
    /// Quoted literal, e.g. `'foo.vm'`
    StringLiteral { value: String, location: Location },
    /// Variable reference, e.g. `$path`, resolved against the context
    Reference { name: String, location: Location },
    /// Any other node kind; never a legal include argument
    Other {
        /// Parser-facing kind name, e.g. `IntegerLiteral`
        kind: String,
        /// Source text of the node, used in diagnostics
        text: String,
        location: Location,
    },
}

impl ArgNode {
    /// Where this argument appears in its template
    pub fn location(&self) -> &Location {
        match self {
            ArgNode::StringLiteral { location, .. }
            | ArgNode::Reference { location, .. }
            | ArgNode::Other { location, .. } => location,
        }
    }

    /// Evaluate the argument against a context.
    ///
    /// Literals yield themselves, references look the name up, and
    /// [`ArgNode::Other`] has no value.
    pub fn evaluate(&self, context: &dyn Context) -> Option<Value> {
        match self {
            ArgNode::StringLiteral { value, .. } => Some(Value::Str(value.clone())),
            ArgNode::Reference { name, .. } => context.get(name),
            ArgNode::Other { .. } => None,
        }
    }

    /// Source text for diagnostics
    pub fn text(&self) -> String {
        match self {
            ArgNode::StringLiteral { value, .. } => format!("'{}'", value),
            ArgNode::Reference { name, .. } => format!("${}", name),
            ArgNode::Other { text, .. } => text.clone(),
        }
    }
}

/// A directive invocation with its argument children
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveCall {
    /// Directive name, e.g. `include`
    pub name: String,
    /// Call site within the enclosing template
    pub location: Location,
    /// Argument children in source order
    pub args: Vec<ArgNode>,
}

impl DirectiveCall {
    /// Create a call with no arguments
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            args: Vec::new(),
        }
    }

    /// Append an argument child
    pub fn arg(mut self, arg: ArgNode) -> Self {
        self.args.push(arg);
        self
    }
}
