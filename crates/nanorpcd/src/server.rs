//! The RPC server: a listener wired to the session handler.

use std::net::SocketAddr;
use std::sync::Arc;

use nanorpc_config::BindAddress;

use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::session::{RpcConnectionHandler, ServerContext};
use crate::target::TargetRegistry;
use crate::transport::{ListenerError, ListenerHandle, SocketListener};

/// Serves a fixed [`ServerContext`] to one client at a time.
pub struct Server {
    context: Arc<ServerContext>,
    reporter: Arc<dyn HealthReporter>,
}

impl Server {
    /// Creates a server for `registry`, advertising `description`.
    pub fn new(registry: TargetRegistry, description: impl Into<String>) -> Self {
        Self::from_context(ServerContext::new(registry, description))
    }

    /// Creates a server from a prepared context.
    pub fn from_context(context: ServerContext) -> Self {
        Self {
            context: Arc::new(context),
            reporter: Arc::new(StructuredHealthReporter::new()),
        }
    }

    /// Replaces the lifecycle reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn HealthReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Binds `address` and starts serving on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] if the address cannot be bound.
    pub fn start(&self, address: &BindAddress) -> Result<RunningServer, ListenerError> {
        let listener = SocketListener::bind(address)?;
        let handler = Arc::new(RpcConnectionHandler::new(
            Arc::clone(&self.context),
            Arc::clone(&self.reporter),
        ));
        let handle = listener.start(handler)?;
        self.reporter.listening(handle.local_addr());
        Ok(RunningServer { handle })
    }
}

/// A server accepting connections.
///
/// Dropping it requests shutdown without waiting.
#[derive(Debug)]
pub struct RunningServer {
    handle: ListenerHandle,
}

impl RunningServer {
    /// Address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.handle.local_addr()
    }

    /// Stops accepting connections and waits for the accept thread. A
    /// session in progress has its socket shut down and ends at once.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] if the accept thread panicked.
    pub fn stop(self) -> Result<(), ListenerError> {
        self.handle.shutdown();
        self.handle.join()
    }
}
