//! A line-oriented TCP RPC server speaking the `pc_rpc` handshake.
//!
//! Applications register named [`Target`] objects in a [`TargetRegistry`]
//! and hand it to [`Server`] (or to [`run_server`] for a full process with
//! configuration, telemetry, and signal handling). Each connection selects
//! one target during the handshake and then issues requests against it,
//! one text line per request and one per response. Values travel as
//! literals in the peers' object notation; see [`codec`].
//!
//! The server handles one connection at a time. A second client queues in
//! the listen backlog until the first disconnects.
//!
//! ```no_run
//! use nanorpcd::{demo, run_server};
//!
//! run_server(demo::example_registry(), demo::DESCRIPTION)?;
//! # Ok::<(), nanorpcd::LaunchError>(())
//! ```

mod bootstrap;
pub mod codec;
pub mod demo;
pub mod dispatch;
mod health;
mod process;
mod server;
pub mod session;
pub mod target;
mod telemetry;
pub mod transport;

pub use bootstrap::{
    BootstrapError, Bootstrapped, ConfigLoader, StaticConfigLoader, SystemConfigLoader,
    bootstrap_with,
};
pub use codec::{CodecError, FromValue, Value, decode, encode};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_server};
pub use server::{RunningServer, Server};
pub use session::ServerContext;
pub use target::{
    ArgSpec, ArgumentError, BoundArguments, CallError, MethodError, MethodTable, TableTarget,
    Target, TargetRegistry,
};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
