//! Remotely callable targets.
//!
//! Targets expose methods through an explicit registration table rather than
//! runtime introspection. Each method carries a hand-written [`ArgSpec`] used
//! both to bind incoming arguments and to describe the method to clients.

mod argspec;
mod binding;
mod registry;
mod table;


use crate::codec::Value;

pub use self::argspec::ArgSpec;
pub use self::binding::{ArgumentError, BoundArguments};
pub use self::registry::{TargetEntry, TargetRegistry};
pub use self::table::{CallError, MethodDescriptor, MethodError, MethodTable, TableTarget};

/// An object whose methods may be invoked over the wire.
pub trait Target: Send + Sync {
    /// Type name used in missing-method messages.
    fn type_name(&self) -> &str;

    /// The target's own documentation.
    fn docstring(&self) -> Option<&str>;

    /// Every method name, sorted, including underscore-prefixed ones.
    fn method_names(&self) -> Vec<String>;

    /// Descriptor for `name`, if the method exists.
    fn descriptor(&self, name: &str) -> Option<&MethodDescriptor>;

    /// Invokes `name` with positional and keyword arguments.
    ///
    /// # Errors
    ///
    /// Returns [`CallError`] when the method is missing, the arguments do
    /// not bind, or the method body fails.
    fn call(
        &self,
        name: &str,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    ) -> Result<Value, CallError>;
}
