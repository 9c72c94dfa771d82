//! Test harness utilities shared by the server suites.

mod client;
mod config_loader;
mod reporter;
mod shutdown;

pub use client::RpcClient;
pub use config_loader::{FailingConfigLoader, loopback_config};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use shutdown::TestShutdownSignal;
