//! Minimal HTTP/1.1 client written directly against `std::net::TcpStream`.
//!
//! # Overview
//! One call is one request: resolve the URL, open a socket, write a
//! hand-built request, read until the server closes, then pull the status
//! code and body out of the raw text. GET and POST are the only methods.
//!
//! # Design
//! - `HttpClient` carries configuration only; each request owns its
//!   `Connection` and releases it on every exit path.
//! - Every request is sent with `Connection: close`, so end-of-stream marks
//!   the end of the response. There is no chunked or length-bounded reading.
//! - Status and body extraction is substring splitting, not a header parser.
//! - Protocol steps are public so they can be tested one at a time.

pub mod client;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod response;

pub use client::{ClientConfig, HttpClient};
pub use connection::Connection;
pub use endpoint::{resolve, Endpoint};
pub use error::ClientError;
pub use http::{build_payload, encode_form, Method, Response};
pub use response::{parse_body, parse_headers, parse_status_code};
