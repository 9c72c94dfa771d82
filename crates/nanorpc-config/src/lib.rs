//! Shared configuration for the nanorpc server.
//!
//! Settings are layered from built-in defaults, `NANORPC_*` environment
//! variables, and command-line flags, with later layers taking precedence.
//! Loading never terminates the process: callers receive a [`ConfigError`]
//! and decide how to report it.

mod bind;
mod defaults;
mod logging;

use std::ffi::OsString;

use clap::Parser;
use thiserror::Error;

pub use bind::BindAddress;
pub use defaults::{
    DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, default_bind_address, default_log_filter,
    default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Command-line and environment surface for [`Config`].
#[derive(Parser, Debug)]
#[command(name = "nanorpcd", about = "Minimal line-oriented RPC server")]
struct ConfigArgs {
    /// Host name or address to bind.
    #[arg(long, env = "NANORPC_HOST", default_value = DEFAULT_HOST)]
    host: String,
    /// TCP port to listen on.
    #[arg(short, long, env = "NANORPC_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Overrides the description advertised during the handshake.
    #[arg(long, env = "NANORPC_DESCRIPTION")]
    description: Option<String>,
    /// Tracing filter expression, for example `info` or `nanorpcd=debug`.
    #[arg(long, env = "NANORPC_LOG_FILTER", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
    /// Log output format (`compact` or `json`).
    #[arg(long, env = "NANORPC_LOG_FORMAT", default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the listener binds to.
    pub bind: BindAddress,
    /// Description override; `None` keeps the application's own description.
    pub description: Option<String>,
    /// Tracing filter expression.
    pub log_filter: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
            description: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: default_log_format(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Arguments or environment values were rejected. Also carries the
    /// `--help` and `--version` displays, which clap reports as errors.
    #[error(transparent)]
    Arguments(#[from] clap::Error),
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Arguments`] when a flag or environment value
    /// fails to parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_iter(std::env::args_os())
    }

    /// Loads configuration from an explicit argument list (the first item is
    /// the program name) plus the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Arguments`] when a flag or environment value
    /// fails to parse.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed = ConfigArgs::try_parse_from(args)?;
        Ok(Self {
            bind: BindAddress::new(parsed.host, parsed.port),
            description: parsed.description,
            log_filter: parsed.log_filter,
            log_format: parsed.log_format,
        })
    }

    /// Address the listener binds to.
    #[must_use]
    pub fn bind(&self) -> &BindAddress {
        &self.bind
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Picks the handshake description: the configured override when present,
    /// otherwise `fallback`.
    #[must_use]
    pub fn description_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.description.as_deref().unwrap_or(fallback)
    }
}
