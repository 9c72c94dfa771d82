//! Blocking line client used to drive a running server over TCP.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use crate::codec::{Value, decode};
use crate::session::MAGIC;

const READ_TIMEOUT: Duration = Duration::from_secs(2);

/// A client connection with a line reader and a writer half.
pub struct RpcClient {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl RpcClient {
    /// Connects to `address` with a two second read timeout.
    pub fn connect(address: SocketAddr) -> Self {
        let stream = TcpStream::connect(address).expect("connect client");
        stream
            .set_read_timeout(Some(READ_TIMEOUT))
            .expect("set read timeout");
        let writer = stream.try_clone().expect("clone client stream");
        Self {
            reader: BufReader::new(stream),
            writer,
        }
    }

    /// Writes raw bytes without adding a terminator.
    pub fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).expect("write to server");
        self.writer.flush().expect("flush to server");
    }

    /// Writes `line` followed by a newline.
    pub fn send(&mut self, line: &str) {
        self.send_raw(format!("{line}\n").as_bytes());
    }

    /// Reads one reply line, without its terminator.
    pub fn read_line(&mut self) -> String {
        self.try_read_line()
            .expect("read from server")
            .expect("server closed the connection")
    }

    /// Reads one line, yielding `None` at end of stream.
    pub fn try_read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Changes the read timeout for subsequent reads.
    pub fn set_read_timeout(&self, timeout: Duration) {
        self.writer
            .set_read_timeout(Some(timeout))
            .expect("set read timeout");
    }

    /// Drains the connection until the server closes it. A reset counts as
    /// a close.
    pub fn read_to_end(&mut self) -> Vec<u8> {
        let mut rest = Vec::new();
        match self.reader.read_to_end(&mut rest) {
            Ok(_) => rest,
            Err(error) if error.kind() == io::ErrorKind::ConnectionReset => rest,
            Err(error) => panic!("read to end: {error}"),
        }
    }

    /// Sends the magic line and reads the catalog.
    pub fn greet(&mut self) -> Value {
        self.send_raw(MAGIC);
        decode(&self.read_line())
    }

    /// Selects `target` and reads the method-name set.
    pub fn select(&mut self, target: &str) -> Value {
        self.send(target);
        decode(&self.read_line())
    }

    /// Sends a request line and decodes the reply.
    pub fn request(&mut self, line: &str) -> Value {
        self.send(line);
        decode(&self.read_line())
    }
}
