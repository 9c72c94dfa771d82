//! Registration tables mapping method names to handlers.
//!
//! A [`MethodTable`] is built once per target type and shared by every
//! instance through an `Arc`. Each entry pairs a handler with the
//! [`MethodDescriptor`] the catalog action reports for it.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::codec::Value;

use super::Target;
use super::argspec::ArgSpec;
use super::binding::{ArgumentError, BoundArguments};

/// Failure raised by a method body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MethodError {
    message: String,
}

impl MethodError {
    /// Creates a method error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message reported to the client.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ArgumentError> for MethodError {
    fn from(error: ArgumentError) -> Self {
        Self::new(error.to_string())
    }
}

/// Errors raised while invoking a method on a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The target exposes no method with the requested name.
    #[error("'{type_name}' object has no attribute '{name}'")]
    NoSuchMethod { type_name: String, name: String },

    /// The call arguments do not fit the method's specification.
    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    /// The method body reported a failure.
    #[error(transparent)]
    Method(#[from] MethodError),
}

impl CallError {
    /// Creates a missing-method error.
    pub fn no_such_method(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NoSuchMethod {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// Argument specification and documentation for one method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    name: String,
    spec: ArgSpec,
    doc: Option<String>,
}

impl MethodDescriptor {
    /// Creates a descriptor.
    pub fn new(name: impl Into<String>, spec: ArgSpec, doc: Option<&str>) -> Self {
        Self {
            name: name.into(),
            spec,
            doc: doc.map(str::to_owned),
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument specification.
    pub fn spec(&self) -> &ArgSpec {
        &self.spec
    }

    /// Documentation text, if any.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The `(argspec, docstring)` pair reported by the catalog action.
    pub fn document(&self) -> Value {
        Value::Tuple(vec![self.spec().to_value(), Value::from(self.doc())])
    }
}

type Handler<T> = Box<dyn Fn(&T, &BoundArguments) -> Result<Value, MethodError> + Send + Sync>;

struct MethodEntry<T> {
    descriptor: MethodDescriptor,
    handler: Handler<T>,
}

/// Method registrations for a target type `T`.
pub struct MethodTable<T> {
    type_name: String,
    doc: Option<String>,
    methods: BTreeMap<String, MethodEntry<T>>,
}

impl<T> MethodTable<T> {
    /// Creates an empty table. `type_name` appears in missing-method
    /// messages.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            doc: None,
            methods: BTreeMap::new(),
        }
    }

    /// Sets the target's own documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Registers a method. Registering a name twice replaces the earlier
    /// entry.
    #[must_use]
    pub fn method<F>(mut self, name: &str, spec: ArgSpec, doc: Option<&str>, handler: F) -> Self
    where
        F: Fn(&T, &BoundArguments) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        let entry = MethodEntry {
            descriptor: MethodDescriptor::new(name, spec, doc),
            handler: Box::new(handler),
        };
        self.methods.insert(name.to_owned(), entry);
        self
    }

    /// Registered method names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl<T> fmt::Debug for MethodTable<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MethodTable")
            .field("type_name", &self.type_name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// A target built from state plus a shared [`MethodTable`].
pub struct TableTarget<T> {
    state: T,
    table: Arc<MethodTable<T>>,
}

impl<T> TableTarget<T> {
    /// Pairs `state` with `table`.
    pub fn new(state: T, table: Arc<MethodTable<T>>) -> Self {
        Self { state, table }
    }

    /// The wrapped state.
    pub fn state(&self) -> &T {
        &self.state
    }
}

impl<T> Target for TableTarget<T>
where
    T: Send + Sync,
{
    fn type_name(&self) -> &str {
        &self.table.type_name
    }

    fn docstring(&self) -> Option<&str> {
        self.table.doc.as_deref()
    }

    fn method_names(&self) -> Vec<String> {
        self.table.names().map(str::to_owned).collect()
    }

    fn descriptor(&self, name: &str) -> Option<&MethodDescriptor> {
        self.table.methods.get(name).map(|entry| &entry.descriptor)
    }

    fn call(
        &self,
        name: &str,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    ) -> Result<Value, CallError> {
        let entry = self
            .table
            .methods
            .get(name)
            .ok_or_else(|| CallError::no_such_method(&self.table.type_name, name))?;
        let bound = entry.descriptor.spec().bind(name, args, kwargs)?;
        Ok((entry.handler)(&self.state, &bound)?)
    }
}
