//! Connection handler that runs a [`Session`] over each accepted socket.

use std::sync::Arc;

use tracing::warn;

use crate::health::HealthReporter;
use crate::transport::{ConnectionHandler, ConnectionStream};

use super::{SESSION_TARGET, ServerContext, Session};

/// Serves the RPC protocol on accepted connections.
pub struct RpcConnectionHandler {
    context: Arc<ServerContext>,
    reporter: Arc<dyn HealthReporter>,
}

impl RpcConnectionHandler {
    /// Creates a handler sharing `context` across connections.
    pub fn new(context: Arc<ServerContext>, reporter: Arc<dyn HealthReporter>) -> Self {
        Self { context, reporter }
    }
}

impl ConnectionHandler for RpcConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        let peer = stream.peer();
        self.reporter.session_opened(peer);
        let lines = match stream.into_lines() {
            Ok(lines) => lines,
            Err(error) => {
                warn!(
                    target: SESSION_TARGET,
                    peer = %peer,
                    error = %error,
                    "failed to prepare connection"
                );
                return;
            }
        };
        let mut session = Session::new(&self.context, lines);
        let end = session.run();
        self.reporter.session_closed(peer, &end);
    }
}
