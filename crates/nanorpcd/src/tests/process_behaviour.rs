//! Behavioural tests covering server process launch and shutdown.

use std::cell::RefCell;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use nanorpc_config::{Config, ConfigError};

use crate::bootstrap::{BootstrapError, ConfigLoader, StaticConfigLoader};
use crate::codec::Value;
use crate::demo;
use crate::health::HealthReporter;
use crate::process::LaunchError;
use crate::process::launch::{LaunchPlan, run_server_with};

use super::support::{
    FailingConfigLoader, HealthEvent, RecordingHealthReporter, RpcClient, TestShutdownSignal,
    loopback_config,
};

const WAIT_TIMEOUT: Duration = Duration::from_secs(2);
const POLL_INTERVAL: Duration = Duration::from_millis(25);

enum ScenarioLoader {
    Static(StaticConfigLoader),
    Failing(FailingConfigLoader),
}

impl ConfigLoader for ScenarioLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        match self {
            Self::Static(loader) => loader.load(),
            Self::Failing(loader) => loader.load(),
        }
    }
}

struct ProcessWorld {
    config: Config,
    invalid: bool,
    reporter: Arc<RecordingHealthReporter>,
    shutdown: TestShutdownSignal,
    handle: Option<thread::JoinHandle<Result<(), LaunchError>>>,
    result: Option<Result<(), LaunchError>>,
    catalog: Option<Value>,
    idle: Option<RpcClient>,
}

impl ProcessWorld {
    fn new() -> Self {
        Self {
            config: loopback_config(),
            invalid: false,
            reporter: Arc::new(RecordingHealthReporter::default()),
            shutdown: TestShutdownSignal::new(),
            handle: None,
            result: None,
            catalog: None,
            idle: None,
        }
    }

    fn start(&mut self) {
        let loader = if self.invalid {
            ScenarioLoader::Failing(FailingConfigLoader)
        } else {
            ScenarioLoader::Static(StaticConfigLoader::new(self.config.clone()))
        };
        let reporter = self.reporter.clone() as Arc<dyn HealthReporter>;
        let shutdown = self.shutdown.clone();
        self.handle = Some(thread::spawn(move || {
            run_server_with(LaunchPlan {
                loader,
                shutdown,
                reporter,
                registry: demo::example_registry(),
                description: demo::DESCRIPTION.to_owned(),
            })
        }));
    }

    fn wait_for_listening(&self) -> Option<SocketAddr> {
        let deadline = Instant::now() + WAIT_TIMEOUT;
        while Instant::now() < deadline {
            if let Some(address) = self.reporter.listening_address() {
                return Some(address);
            }
            thread::sleep(POLL_INTERVAL);
        }
        None
    }

    fn join(&mut self) -> &Result<(), LaunchError> {
        if let Some(handle) = self.handle.take() {
            let result = handle.join().expect("server thread panicked");
            self.result = Some(result);
        }
        self.result.as_ref().expect("server process should have run")
    }
}

impl Drop for ProcessWorld {
    fn drop(&mut self) {
        self.shutdown.trigger();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[fixture]
fn world() -> RefCell<ProcessWorld> {
    RefCell::new(ProcessWorld::new())
}

#[given("a fresh server process")]
fn given_fresh_process(world: &RefCell<ProcessWorld>) {
    let _ = world;
}

#[given("the configuration describes the server as \"{description}\"")]
fn given_description(world: &RefCell<ProcessWorld>, description: String) {
    world.borrow_mut().config.description = Some(description);
}

#[given("the configuration is invalid")]
fn given_invalid_configuration(world: &RefCell<ProcessWorld>) {
    world.borrow_mut().invalid = true;
}

#[when("the server process starts")]
fn when_process_starts(world: &RefCell<ProcessWorld>) {
    world.borrow_mut().start();
}

#[when("a client greets the running process")]
fn when_client_greets(world: &RefCell<ProcessWorld>) {
    let address = world
        .borrow()
        .wait_for_listening()
        .expect("server should be listening");
    let mut client = RpcClient::connect(address);
    world.borrow_mut().catalog = Some(client.greet());
}

#[when("a client greets the running process and stays idle")]
fn when_client_stays_idle(world: &RefCell<ProcessWorld>) {
    let address = world
        .borrow()
        .wait_for_listening()
        .expect("server should be listening");
    let mut client = RpcClient::connect(address);
    client.greet();
    world.borrow_mut().idle = Some(client);
}

#[when("shutdown is triggered")]
fn when_shutdown_triggered(world: &RefCell<ProcessWorld>) {
    world.borrow().shutdown.trigger();
}

#[then("the server process is listening")]
fn then_process_listening(world: &RefCell<ProcessWorld>) {
    assert!(
        world.borrow().wait_for_listening().is_some(),
        "expected a listening event, got {:?}",
        world.borrow().reporter.events()
    );
}

#[then("the advertised description is \"{description}\"")]
fn then_advertised_description(world: &RefCell<ProcessWorld>, description: String) {
    let world = world.borrow();
    let catalog = world.catalog.as_ref().expect("catalog should be read");
    assert_eq!(
        catalog.get("description").and_then(Value::as_str),
        Some(description.as_str())
    );
}

#[then("the server process exits cleanly")]
fn then_process_exits_cleanly(world: &RefCell<ProcessWorld>) {
    let mut world = world.borrow_mut();
    let result = world.join();
    assert!(result.is_ok(), "server process failed: {result:?}");
}

#[then("the server process fails during bootstrap")]
fn then_process_fails_bootstrap(world: &RefCell<ProcessWorld>) {
    let mut world = world.borrow_mut();
    let result = world.join();
    assert!(
        matches!(
            result,
            Err(LaunchError::Bootstrap(BootstrapError::Configuration { .. }))
        ),
        "unexpected result: {result:?}"
    );
}

#[then("the idle client sees the connection close")]
fn then_idle_client_closed(world: &RefCell<ProcessWorld>) {
    let mut world = world.borrow_mut();
    let client = world.idle.as_mut().expect("an idle client should be connected");
    let rest = client.read_to_end();
    assert!(rest.is_empty(), "unexpected bytes: {rest:?}");
}

#[then("bootstrap success is reported")]
fn then_bootstrap_success(world: &RefCell<ProcessWorld>) {
    let events = world.borrow().reporter.events();
    assert!(events.contains(&HealthEvent::BootstrapStarting));
    assert!(events.contains(&HealthEvent::BootstrapSucceeded));
}

#[then("bootstrap failure is reported")]
fn then_bootstrap_failure(world: &RefCell<ProcessWorld>) {
    let events = world.borrow().reporter.events();
    assert!(
        events
            .iter()
            .any(|event| matches!(event, HealthEvent::BootstrapFailed(_))),
        "expected a bootstrap failure, got {events:?}"
    );
    assert!(!events.contains(&HealthEvent::BootstrapSucceeded));
}

#[scenario(path = "tests/features/server_process.feature", index = 0)]
fn server_runs_until_shutdown(#[from(world)] world: RefCell<ProcessWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/server_process.feature", index = 1)]
fn configured_description_overrides(#[from(world)] world: RefCell<ProcessWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/server_process.feature", index = 2)]
fn invalid_configuration_fails_launch(#[from(world)] world: RefCell<ProcessWorld>) {
    drop(world);
}

#[scenario(path = "tests/features/server_process.feature", index = 3)]
fn shutdown_interrupts_idle_client(#[from(world)] world: RefCell<ProcessWorld>) {
    drop(world);
}
