//! Connection handling abstractions for the listener.

use std::io::{self, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream};

use super::line_stream::StreamLines;

/// An accepted TCP connection.
#[derive(Debug)]
pub struct ConnectionStream {
    stream: TcpStream,
    peer: SocketAddr,
}

impl ConnectionStream {
    pub(crate) fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Self { stream, peer }
    }

    /// Duplicates the socket handle so the listener can shut the
    /// connection down from another thread.
    pub(crate) fn try_clone_socket(&self) -> io::Result<TcpStream> {
        self.stream.try_clone()
    }

    /// Address of the connected client.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Splits the socket into a buffered line reader and an unbuffered
    /// writer sharing the same connection.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while duplicating the socket handle.
    pub fn into_lines(self) -> io::Result<StreamLines<BufReader<TcpStream>, TcpStream>> {
        let writer = self.stream.try_clone()?;
        Ok(StreamLines::new(BufReader::new(self.stream), writer))
    }
}

impl Read for ConnectionStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for ConnectionStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

/// Handles accepted socket connections.
///
/// The listener calls [`handle`](Self::handle) on its accept thread and waits
/// for it to return before accepting the next client.
pub trait ConnectionHandler: Send + Sync + 'static {
    /// Handles a single connection. Implementations should avoid panicking.
    fn handle(&self, stream: ConnectionStream);
}
