//! A single blocking TCP connection, owned by one request.
//!
//! # Design
//! A `Connection` is created at the start of a request and consumed by
//! `close` at the end of it. Nothing stores it between calls. If a request
//! fails half way, dropping the value closes the socket, so no error path
//! leaves a connection open.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::error::ClientError;

/// Upper bound on the bytes taken by a single read.
pub const READ_CHUNK_SIZE: usize = 1024;

#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: String,
}

impl Connection {
    /// Open a TCP stream to `host:port`. No retry on failure.
    pub fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let peer = format!("{host}:{port}");
        let stream = TcpStream::connect((host, port))
            .map_err(|e| ClientError::Connection(format!("{peer}: {e}")))?;
        log::debug!("connected to {peer}");
        Ok(Self { stream, peer })
    }

    /// Make every later read fail once `timeout` passes without data.
    /// `None` blocks forever.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<(), ClientError> {
        self.stream
            .set_read_timeout(timeout)
            .map_err(|e| ClientError::Transport(format!("{}: setting read timeout: {e}", self.peer)))
    }

    /// Write the whole payload as UTF-8.
    pub fn send(&mut self, payload: &str) -> Result<(), ClientError> {
        self.stream
            .write_all(payload.as_bytes())
            .and_then(|()| self.stream.flush())
            .map_err(|e| ClientError::Transport(format!("{}: sending request: {e}", self.peer)))?;
        log::debug!("sent {} bytes to {}", payload.len(), self.peer);
        Ok(())
    }

    /// Read until the peer closes the stream and decode what arrived as UTF-8.
    pub fn receive_all(&mut self) -> Result<String, ClientError> {
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; READ_CHUNK_SIZE];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => buffer.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(ClientError::Transport(format!(
                        "{}: reading response: {e}",
                        self.peer
                    )))
                }
            }
        }
        log::debug!("received {} bytes from {}", buffer.len(), self.peer);

        String::from_utf8(buffer)
            .map_err(|e| ClientError::Decode(format!("response from {} is not UTF-8: {e}", self.peer)))
    }

    /// Close the socket. Consumes the connection so it cannot be used again.
    pub fn close(self) {
        log::debug!("closing connection to {}", self.peer);
    }
}
