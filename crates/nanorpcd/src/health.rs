//! Structured health reporting for server lifecycle events.

use std::net::SocketAddr;
use std::sync::Arc;

use nanorpc_config::Config;

use crate::bootstrap::BootstrapError;
use crate::session::SessionEnd;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the listener accepts connections on `address`.
    fn listening(&self, address: SocketAddr);

    /// Invoked when a client connection is accepted.
    fn session_opened(&self, peer: SocketAddr);

    /// Invoked after a session has released its connection.
    fn session_closed(&self, peer: SocketAddr, end: &SessionEnd);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn listening(&self, address: SocketAddr) {
        (**self).listening(address);
    }

    fn session_opened(&self, peer: SocketAddr) {
        (**self).session_opened(peer);
    }

    fn session_closed(&self, peer: SocketAddr, end: &SessionEnd) {
        (**self).session_closed(peer, end);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting server bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            bind = %config.bind(),
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            "server bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "server bootstrap failed"
        );
    }

    fn listening(&self, address: SocketAddr) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listening",
            address = %address,
            "server listening"
        );
    }

    fn session_opened(&self, peer: SocketAddr) {
        tracing::debug!(
            target: HEALTH_TARGET,
            event = "session_opened",
            peer = %peer,
            "session opened"
        );
    }

    fn session_closed(&self, peer: SocketAddr, end: &SessionEnd) {
        match end {
            SessionEnd::Transport(error) if !error.is_disconnect() => tracing::warn!(
                target: HEALTH_TARGET,
                event = "session_closed",
                peer = %peer,
                error = %error,
                "session ended by transport failure"
            ),
            _ => tracing::debug!(
                target: HEALTH_TARGET,
                event = "session_closed",
                peer = %peer,
                outcome = %end,
                "session closed"
            ),
        }
    }
}
