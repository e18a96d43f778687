//! GET and POST over a fresh connection per call.
//!
//! # Design
//! `HttpClient` holds only configuration. Every request resolves its URL,
//! opens its own `Connection`, and closes it once the peer has finished
//! sending, before the response is parsed. Because no socket lives on the
//! client, one value can be shared between threads.

use std::io::{self, Write};
use std::time::Duration;

use crate::connection::Connection;
use crate::endpoint::{self, Endpoint};
use crate::error::ClientError;
use crate::http::{build_payload, encode_form, Method, Response};
use crate::response::{parse_body, parse_status_code};

/// Knobs for `HttpClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Give up on a silent peer after this long. `None` waits forever.
    pub read_timeout: Option<Duration>,
    /// Print the status code and body to stdout after each request.
    pub echo: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            read_timeout: None,
            echo: true,
        }
    }
}

/// Blocking HTTP/1.1 client speaking directly over TCP.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    config: ClientConfig,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a GET. `args` are accepted for symmetry with `post` but a GET
    /// never carries a body.
    pub fn get(&self, url: &str, args: Option<&[(String, String)]>) -> Result<Response, ClientError> {
        if args.is_some_and(|args| !args.is_empty()) {
            log::debug!("GET {url}: ignoring form arguments");
        }
        self.request(Method::Get, url, "")
    }

    /// Issue a POST with `args` form-encoded into the body.
    pub fn post(&self, url: &str, args: Option<&[(String, String)]>) -> Result<Response, ClientError> {
        let body = args.map(encode_form).unwrap_or_default();
        self.request(Method::Post, url, &body)
    }

    /// POST when `method` is exactly `"POST"`, GET for anything else.
    pub fn command(
        &self,
        url: &str,
        method: &str,
        args: Option<&[(String, String)]>,
    ) -> Result<Response, ClientError> {
        if method == Method::Post.as_str() {
            self.post(url, args)
        } else {
            self.get(url, args)
        }
    }

    fn request(&self, method: Method, url: &str, body: &str) -> Result<Response, ClientError> {
        let Endpoint { host, port, path } = endpoint::resolve(url);
        let payload = build_payload(method.as_str(), &host, &path, body)?;

        let mut conn = Connection::connect(&host, port)?;
        conn.set_read_timeout(self.config.read_timeout)?;
        conn.send(&payload)?;
        let data = conn.receive_all()?;
        conn.close();

        let code = parse_status_code(&data)?;
        let body = parse_body(&data);
        log::info!("{method} {url} -> {code} ({} body bytes)", body.len());

        if self.config.echo {
            echo(&mut io::stdout().lock(), code, &body)
                .map_err(|e| ClientError::Transport(format!("writing response to stdout: {e}")))?;
        }
        Ok(Response { code, body })
    }
}

/// Status code on one line, body on the next.
fn echo(out: &mut impl Write, code: u16, body: &str) -> io::Result<()> {
    writeln!(out, "{code}")?;
    writeln!(out, "{body}")?;
    out.flush()
}
