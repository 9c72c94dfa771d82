use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use rstest::rstest;

use nanorpc_config::{Config, ConfigError, LogFormat};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner)
}

fn args(extra: &[&str]) -> Vec<OsString> {
    std::iter::once("nanorpcd")
        .chain(extra.iter().copied())
        .map(OsString::from)
        .collect()
}

#[rstest]
#[case::port_out_of_range(&["--port", "70000"])]
#[case::port_not_numeric(&["-p", "http"])]
#[case::unknown_log_format(&["--log-format", "pretty"])]
#[case::unknown_flag(&["--daemonize"])]
fn invalid_arguments_return_errors(#[case] extra: &[&str]) {
    let _guard = env_guard();
    let error = Config::load_from_iter(args(extra)).expect_err("loading must fail");
    assert!(matches!(error, ConfigError::Arguments(_)));
}

#[rstest]
fn json_log_format_is_accepted() {
    let _guard = env_guard();
    let config =
        Config::load_from_iter(args(&["--log-format", "json"])).expect("config should load");
    assert_eq!(config.log_format(), LogFormat::Json);
}

#[rstest]
fn description_override_wins_over_fallback() {
    let _guard = env_guard();
    let config = Config::load_from_iter(args(&["--description", "bench supply"]))
        .expect("config should load");
    assert_eq!(config.description_or("example adder"), "bench supply");
    assert_eq!(Config::default().description_or("example adder"), "example adder");
}
