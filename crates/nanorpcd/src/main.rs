use std::io::{self, Write};
use std::process::ExitCode;

use nanorpc_config::ConfigError;
use nanorpcd::{BootstrapError, LaunchError, demo, run_server};

fn main() -> ExitCode {
    match run_server(demo::example_registry(), demo::DESCRIPTION) {
        Ok(()) => ExitCode::SUCCESS,
        Err(LaunchError::Bootstrap(BootstrapError::Configuration {
            source: ConfigError::Arguments(error),
        })) => {
            let _ = error.print();
            u8::try_from(error.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
        }
        Err(error) => {
            let mut stderr = io::stderr();
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}
