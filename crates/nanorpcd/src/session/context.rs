//! Immutable server-wide state shared by every session.

use crate::codec::Value;
use crate::target::TargetRegistry;

/// Registry and description advertised to every client.
#[derive(Debug)]
pub struct ServerContext {
    registry: TargetRegistry,
    description: String,
}

impl ServerContext {
    /// Creates a context.
    pub fn new(registry: TargetRegistry, description: impl Into<String>) -> Self {
        Self {
            registry,
            description: description.into(),
        }
    }

    /// The target registry.
    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// The advertised description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The handshake catalog: sorted target names plus the description.
    pub fn catalog(&self) -> Value {
        let targets = self.registry.names().into_iter().map(Value::Str).collect();
        Value::dict([
            ("targets", Value::List(targets)),
            ("description", Value::str(self.description.as_str())),
        ])
    }
}
