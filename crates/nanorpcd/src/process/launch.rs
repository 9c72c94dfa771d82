//! Supervises server launch sequencing.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::server::Server;
use crate::session::ServerContext;
use crate::target::TargetRegistry;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Collaborators and application data needed to launch the server.
pub(crate) struct LaunchPlan<L, S> {
    pub(crate) loader: L,
    pub(crate) shutdown: S,
    pub(crate) reporter: Arc<dyn HealthReporter>,
    pub(crate) registry: TargetRegistry,
    pub(crate) description: String,
}

/// Serves `registry` until a termination signal arrives.
///
/// Configuration comes from the command line and `NANORPC_*` environment
/// variables. A configured description overrides `description`.
///
/// # Errors
///
/// Returns [`LaunchError`] if bootstrap, binding, or signal setup fails.
pub fn run_server(registry: TargetRegistry, description: &str) -> Result<(), LaunchError> {
    run_server_with(LaunchPlan {
        loader: SystemConfigLoader,
        shutdown: SystemShutdownSignal::new(),
        reporter: Arc::new(StructuredHealthReporter::new()),
        registry,
        description: description.to_owned(),
    })
}

/// Runs the server with injected collaborators.
pub(crate) fn run_server_with<L, S>(plan: LaunchPlan<L, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        shutdown,
        reporter,
        registry,
        description,
    } = plan;

    let config = bootstrap_with(&loader, &reporter)?.into_config();
    let context = ServerContext::new(registry, config.description_or(&description));
    info!(
        target: PROCESS_TARGET,
        targets = context.registry().len(),
        description = context.description(),
        "starting server"
    );
    let running = Server::from_context(context)
        .with_reporter(reporter)
        .start(config.bind())?;
    shutdown.wait()?;
    running.stop()?;
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
