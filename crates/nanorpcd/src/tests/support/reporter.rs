//! Test double for [`HealthReporter`] that records lifecycle events.

use std::net::SocketAddr;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use nanorpc_config::Config;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::session::SessionEnd;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// Bootstrap completed successfully.
    BootstrapSucceeded,
    /// Bootstrap failed with an error description.
    BootstrapFailed(String),
    /// The listener is bound.
    Listening(SocketAddr),
    /// A connection was accepted.
    SessionOpened,
    /// A session ended; carries the rendered outcome.
    SessionClosed(String),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }

    /// Address reported by the most recent `listening` event.
    pub fn listening_address(&self) -> Option<SocketAddr> {
        self.events().into_iter().rev().find_map(|event| match event {
            HealthEvent::Listening(address) => Some(address),
            _ => None,
        })
    }

    /// Waits up to two seconds for `count` sessions to close, returning
    /// their outcomes.
    pub fn wait_for_closed_sessions(&self, count: usize) -> Vec<String> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let closed: Vec<String> = self
                .events()
                .into_iter()
                .filter_map(|event| match event {
                    HealthEvent::SessionClosed(outcome) => Some(outcome),
                    _ => None,
                })
                .collect();
            if closed.len() >= count || Instant::now() >= deadline {
                return closed;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn listening(&self, address: SocketAddr) {
        self.record(HealthEvent::Listening(address));
    }

    fn session_opened(&self, _peer: SocketAddr) {
        self.record(HealthEvent::SessionOpened);
    }

    fn session_closed(&self, _peer: SocketAddr, end: &SessionEnd) {
        self.record(HealthEvent::SessionClosed(end.to_string()));
    }
}
