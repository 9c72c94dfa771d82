//! Configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;

use nanorpc_config::{BindAddress, Config, ConfigError};

use crate::bootstrap::ConfigLoader;

/// Configuration binding an ephemeral loopback port.
pub fn loopback_config() -> Config {
    Config {
        bind: BindAddress::new("127.0.0.1", 0),
        ..Config::default()
    }
}

/// Loader that intentionally fails by passing an invalid port.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        let args = vec![
            OsString::from("nanorpcd"),
            OsString::from("--port"),
            OsString::from("not-a-port"),
        ];
        Config::load_from_iter(args)
    }
}
