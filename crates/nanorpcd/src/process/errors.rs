//! Defines the unified error surface for server launch.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::transport::ListenerError;

use super::shutdown::ShutdownError;

/// Errors surfaced while launching or running the server process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Bootstrap failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    /// Binding or running the listener failed.
    #[error("listener failure: {0}")]
    Listener(#[from] ListenerError),
    /// Waiting for a shutdown signal failed.
    #[error("shutdown signal failure: {0}")]
    Shutdown(#[from] ShutdownError),
}
