//! TCP transport for the RPC server.
//!
//! The listener binds the configured address and accepts connections on a
//! background thread, handing each one to a [`ConnectionHandler`] in turn.
//! [`LineStream`] frames a connection as newline-terminated lines.

mod errors;
mod handler;
mod line_stream;
mod listener;
#[cfg(test)]
mod test_utils;

pub use self::errors::ListenerError;
pub use self::handler::{ConnectionHandler, ConnectionStream};
pub use self::line_stream::{LineStream, MAX_LINE_BYTES, StreamLines};
pub use self::listener::{ListenerHandle, SocketListener};
#[cfg(test)]
pub(crate) use self::test_utils::CountingHandler;

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
