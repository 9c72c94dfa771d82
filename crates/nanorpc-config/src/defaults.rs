use crate::bind::BindAddress;
use crate::logging::LogFormat;

/// Host the server binds to when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// TCP port the server binds to when none is configured.
pub const DEFAULT_PORT: u16 = 3478;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binaries.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Computes the default bind address for the server.
pub fn default_bind_address() -> BindAddress {
    BindAddress::new(DEFAULT_HOST, DEFAULT_PORT)
}
