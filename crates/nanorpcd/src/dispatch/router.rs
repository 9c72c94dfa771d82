//! Action routing against a selected target.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::codec::Value;
use crate::target::Target;

use super::errors::DispatchError;
use super::request::RpcRequest;
use super::response::Envelope;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Executes decoded requests against one target.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionRouter;

impl ActionRouter {
    /// Creates a router.
    pub fn new() -> Self {
        Self
    }

    /// Runs `request` and wraps the outcome in an envelope. Never fails;
    /// every error becomes a `Failed` envelope.
    pub fn respond(&self, target: &dyn Target, request: &Value) -> Envelope {
        let envelope = Envelope::from_result(self.route(target, request));
        if let Envelope::Failed { exception } = &envelope {
            warn!(target: DISPATCH_TARGET, exception = %exception, "request failed");
        }
        envelope
    }

    /// Runs `request` against `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the request is malformed, names an
    /// unknown action, or the call fails.
    pub fn route(&self, target: &dyn Target, request: &Value) -> Result<Value, DispatchError> {
        match RpcRequest::from_value(request)? {
            RpcRequest::MethodList => {
                debug!(target: DISPATCH_TARGET, "describing methods");
                Ok(self.method_list(target))
            }
            RpcRequest::Call { name, args, kwargs } => {
                debug!(
                    target: DISPATCH_TARGET,
                    method = %name,
                    positional = args.len(),
                    keywords = kwargs.len(),
                    "calling method"
                );
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| target.call(&name, args, kwargs)));
                match outcome {
                    Ok(result) => Ok(result?),
                    Err(_) => Err(DispatchError::panicked(name)),
                }
            }
        }
    }

    /// Catalog of public methods: names starting with `_` are hidden.
    pub fn method_list(&self, target: &dyn Target) -> Value {
        let methods = target
            .method_names()
            .into_iter()
            .filter(|name| !name.starts_with('_'))
            .filter_map(|name| {
                let document = target.descriptor(&name)?.document();
                Some((name, document))
            });
        Value::dict([
            ("docstring", Value::from(target.docstring())),
            ("methods", Value::dict(methods)),
        ])
    }
}
