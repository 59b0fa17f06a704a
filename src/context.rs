//! Rendering contexts and the per-thread context stack
//!
//! A [`Context`] is the key/value environment references are evaluated
//! against. Contexts may additionally expose the [`ResourceAware`]
//! capability, "what resource is currently being rendered", which the
//! include directive consults for relative-path resolution.
//!
//! [`ContextStack`] keeps a LIFO of active contexts private to each thread,
//! so a nested render call can recover the innermost active context without
//! it being threaded through every call. Pushing returns a [`ContextScope`]
//! guard that restores the stack on every exit path, including unwinding.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::resource::Resource;

/// Errors raised by [`ContextStack`] operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// An empty context may not be pushed
    #[error("cannot push an empty context")]
    EmptyContext,

    /// Peek or pop on an empty stack
    #[error("context stack is empty")]
    Underflow,
}

/// A value stored in a context and produced by argument evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Key/value environment used to evaluate references during rendering
pub trait Context {
    /// Look up a variable by name
    fn get(&self, name: &str) -> Option<Value>;

    /// Whether a variable is present
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether the context holds no variables at all
    fn is_empty(&self) -> bool;

    /// Optional capability: the resource currently being rendered.
    ///
    /// Contexts that return `None` simply disable relative-path resolution;
    /// include paths are then used verbatim.
    fn as_resource_aware(&self) -> Option<&dyn ResourceAware> {
        None
    }
}

impl fmt::Debug for dyn Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Context")
    }
}

/// Capability a context may expose: the ambient resource under render
pub trait ResourceAware {
    /// The resource currently being rendered, if any
    fn current_resource(&self) -> Option<Resource>;

    /// Record the resource currently being rendered
    fn set_current_resource(&self, resource: Resource);
}

/// Stock map-backed context with the [`ResourceAware`] capability
#[derive(Debug, Default)]
pub struct MapContext {
    values: HashMap<String, Value>,
    current: RefCell<Option<Resource>>,
}

impl MapContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, returning the previous value if any
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Remove a variable
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }
}

impl Context for MapContext {
    fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn as_resource_aware(&self) -> Option<&dyn ResourceAware> {
        Some(self)
    }
}

impl ResourceAware for MapContext {
    fn current_resource(&self) -> Option<Resource> {
        self.current.borrow().clone()
    }

    fn set_current_resource(&self, resource: Resource) {
        *self.current.borrow_mut() = Some(resource);
    }
}

/// Shared handle to a context held on the [`ContextStack`]
pub type SharedContext = Rc<dyn Context>;

thread_local! {
    static CONTEXT_STACK: RefCell<Vec<SharedContext>> = const { RefCell::new(Vec::new()) };
}

/// Per-thread LIFO of active rendering contexts.
///
/// Each thread's stack is wholly independent; concurrent renders never
/// observe each other's contexts and no locking is involved.
pub struct ContextStack;

impl ContextStack {
    /// Push a context for the calling thread.
    ///
    /// Fails with [`ContextError::EmptyContext`] when the context holds no
    /// variables; the stack is left unchanged. On success the returned
    /// [`ContextScope`] pops the entry when dropped, so the push/pop pairing
    /// holds across early returns and panics.
    pub fn push(context: SharedContext) -> Result<ContextScope, ContextError> {
        if context.is_empty() {
            return Err(ContextError::EmptyContext);
        }
        let depth = CONTEXT_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(context);
            stack.len() - 1
        });
        Ok(ContextScope { depth })
    }

    /// The innermost active context for the calling thread, non-mutating
    pub fn peek() -> Result<SharedContext, ContextError> {
        CONTEXT_STACK.with(|stack| {
            stack
                .borrow()
                .last()
                .cloned()
                .ok_or(ContextError::Underflow)
        })
    }

    /// Remove and return the innermost active context
    pub fn pop() -> Result<SharedContext, ContextError> {
        CONTEXT_STACK.with(|stack| stack.borrow_mut().pop().ok_or(ContextError::Underflow))
    }

    /// Discard the entire stack for the calling thread
    pub fn clear() {
        CONTEXT_STACK.with(|stack| stack.borrow_mut().clear());
    }

    /// Number of contexts currently stacked on the calling thread
    pub fn depth() -> usize {
        CONTEXT_STACK.with(|stack| stack.borrow().len())
    }
}

/// Guard returned by [`ContextStack::push`].
///
/// Dropping the guard truncates the thread's stack back to its pre-push
/// depth. Truncation rather than a single pop means entries leaked by a
/// nested call that unwound before cleanup are discarded as well.
#[must_use = "dropping the scope immediately pops the pushed context"]
#[derive(Debug)]
pub struct ContextScope {
    depth: usize,
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        CONTEXT_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.len() > self.depth {
                stack.truncate(self.depth);
            }
        });
    }
}
