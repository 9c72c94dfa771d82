//! Per-connection handshake and serving loop.

use std::fmt;

use tracing::debug;

use crate::codec::{Value, decode, encode};
use crate::dispatch::ActionRouter;
use crate::transport::LineStream;

use super::{SESSION_TARGET, ServerContext, SessionError};

/// Exact bytes a client must send before anything else.
pub const MAGIC: &[u8] = b"ARTIQ pc_rpc\n";

/// Position of a session in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the magic line.
    AwaitMagic,
    /// Magic accepted; the catalog is being written.
    SentCatalog,
    /// Waiting for the client to name a target.
    AwaitTarget,
    /// Answering requests against the selected target.
    Serving,
    /// The stream has been released.
    Closed,
}

/// Why a session finished.
#[derive(Debug)]
pub enum SessionEnd {
    /// The first line was not the magic line. Nothing was written.
    BadMagic,
    /// The client named a target that is not registered. Only the catalog
    /// was written.
    UnknownTarget(String),
    /// The client closed the connection after `requests` requests.
    ClientClosed { requests: usize },
    /// A transport failure ended the session.
    Transport(SessionError),
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadMagic => formatter.write_str("bad magic"),
            Self::UnknownTarget(name) => write!(formatter, "unknown target {name:?}"),
            Self::ClientClosed { requests } => {
                write!(formatter, "client closed after {requests} requests")
            }
            Self::Transport(error) => write!(formatter, "{error}"),
        }
    }
}

/// Drives one connection from handshake to close.
///
/// The session is generic over [`LineStream`], so tests can run it against
/// in-memory buffers.
pub struct Session<'a, S> {
    context: &'a ServerContext,
    stream: S,
    phase: Phase,
    router: ActionRouter,
}

impl<'a, S: LineStream> Session<'a, S> {
    /// Creates a session in [`Phase::AwaitMagic`].
    pub fn new(context: &'a ServerContext, stream: S) -> Self {
        Self {
            context,
            stream,
            phase: Phase::AwaitMagic,
            router: ActionRouter::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Releases the underlying stream.
    pub fn into_stream(self) -> S {
        self.stream
    }

    /// Runs the handshake and serving loop until the client leaves or the
    /// transport fails. Always ends in [`Phase::Closed`].
    pub fn run(&mut self) -> SessionEnd {
        let end = self.drive().unwrap_or_else(SessionEnd::Transport);
        if let Err(error) = self.stream.close() {
            debug!(target: SESSION_TARGET, error = %error, "flush on close failed");
        }
        self.phase = Phase::Closed;
        end
    }

    fn drive(&mut self) -> Result<SessionEnd, SessionError> {
        self.phase = Phase::AwaitMagic;
        match self.stream.read_line()? {
            Some(line) if line == MAGIC => {}
            _ => return Ok(SessionEnd::BadMagic),
        }

        self.phase = Phase::SentCatalog;
        self.stream.write_line(&encode(&self.context.catalog()))?;

        self.phase = Phase::AwaitTarget;
        let Some(line) = self.stream.read_line()? else {
            return Ok(SessionEnd::ClientClosed { requests: 0 });
        };
        let name = line.strip_suffix(b"\n").unwrap_or(line.as_slice());
        let resolved = std::str::from_utf8(name)
            .ok()
            .and_then(|name| self.context.registry().resolve(name));
        let Some(target) = resolved else {
            return Ok(SessionEnd::UnknownTarget(
                String::from_utf8_lossy(name).into_owned(),
            ));
        };
        let methods = Value::set(target.method_names().into_iter().map(Value::Str));
        self.stream.write_line(&encode(&methods))?;

        self.phase = Phase::Serving;
        let mut requests = 0;
        while let Some(line) = self.stream.read_line()? {
            requests += 1;
            let text = String::from_utf8_lossy(strip_terminator(&line));
            debug!(
                target: SESSION_TARGET,
                request = requests,
                received = %text,
                "request received"
            );
            let envelope = self.router.respond(target.as_ref(), &decode(&text));
            let reply = encode(&envelope.to_value());
            debug!(
                target: SESSION_TARGET,
                request = requests,
                sending = %reply,
                "sending reply"
            );
            self.stream.write_line(&reply)?;
        }
        Ok(SessionEnd::ClientClosed { requests })
    }
}

/// Drops a trailing `\n` and then a trailing `\r`.
fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
