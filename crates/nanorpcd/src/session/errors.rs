//! Transport failures that end a session.

use std::io;

use thiserror::Error;

/// I/O failure observed while a session was running.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The peer reset, aborted, or half-closed the connection.
    #[error("peer disconnected: {source}")]
    Disconnected {
        #[source]
        source: io::Error,
    },
    /// Any other read or write failure, including oversized lines.
    #[error("connection I/O failed: {source}")]
    Io {
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    /// Whether the failure is an ordinary client disconnect.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::Disconnected { .. })
    }
}

impl From<io::Error> for SessionError {
    fn from(source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => Self::Disconnected { source },
            _ => Self::Io { source },
        }
    }
}
