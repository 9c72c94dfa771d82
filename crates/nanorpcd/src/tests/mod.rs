//! Test suites for the RPC server.

mod process_behaviour;
mod support;
