//! Error types for the raw-socket HTTP client.
//!
//! # Design
//! Every failure is fatal for the request that hit it: nothing in the client
//! retries or degrades. Each variant carries a human-readable message so the
//! caller can report it and stop. A URL that cannot be parsed has no variant
//! of its own; it shows up later as `Connection`.

use std::fmt;

/// Errors returned by `HttpClient` and the protocol helpers.
#[derive(Debug)]
pub enum ClientError {
    /// The method is neither `GET` nor `POST`. Raised before any I/O.
    UnsupportedMethod(String),

    /// The TCP connection could not be established.
    Connection(String),

    /// Sending or receiving failed after the connection was established.
    Transport(String),

    /// The response bytes are not valid UTF-8.
    Decode(String),

    /// The status line is missing its code or the code is not numeric.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::UnsupportedMethod(method) => {
                write!(f, "unsupported method: {method}")
            }
            ClientError::Connection(msg) => write!(f, "connection failed: {msg}"),
            ClientError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ClientError::Decode(msg) => write!(f, "decoding failed: {msg}"),
            ClientError::Parse(msg) => write!(f, "parsing failed: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}
