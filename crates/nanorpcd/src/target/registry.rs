//! Server-wide table of named targets.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::Target;

type Factory = Box<dyn Fn() -> Arc<dyn Target> + Send + Sync>;

/// How a registered name produces its target.
pub enum TargetEntry {
    /// One instance shared by every connection.
    Instance(Arc<dyn Target>),
    /// Builds a fresh instance for each connection that selects the name.
    Factory(Factory),
}

impl TargetEntry {
    /// Returns the live target, invoking the factory if there is one.
    pub fn resolve(&self) -> Arc<dyn Target> {
        match self {
            Self::Instance(target) => Arc::clone(target),
            Self::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for TargetEntry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(target) => formatter
                .debug_tuple("Instance")
                .field(&target.type_name())
                .finish(),
            Self::Factory(_) => formatter.write_str("Factory"),
        }
    }
}

/// Mapping from target name to instance or factory.
///
/// Built once before the server starts and read-only afterwards.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    entries: BTreeMap<String, TargetEntry>,
}

impl TargetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shared instance under `name`.
    #[must_use]
    pub fn with_instance(mut self, name: impl Into<String>, target: Arc<dyn Target>) -> Self {
        self.entries
            .insert(name.into(), TargetEntry::Instance(target));
        self
    }

    /// Registers a per-connection factory under `name`.
    #[must_use]
    pub fn with_factory<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn Target> + Send + Sync + 'static,
    {
        self.entries
            .insert(name.into(), TargetEntry::Factory(Box::new(factory)));
        self
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Resolves `name` to a live target.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Target>> {
        self.entries.get(name).map(TargetEntry::resolve)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
