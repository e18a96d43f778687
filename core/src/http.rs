//! HTTP/1.1 request construction.
//!
//! # Design
//! The request is a single formatted string built fresh for every call and
//! never touched again after `build_payload` returns. Header order and line
//! endings are fixed: servers see exactly the same bytes for the same inputs.
//! The body is followed by one extra `\r\n`, kept so the wire format stays
//! byte-compatible with earlier versions of this client.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ClientError;

/// HTTP method for a request. Only the two the client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    /// The one header line that differs between methods.
    fn specific_header(&self) -> &'static str {
        match self {
            Method::Get => "Accept-Charset: utf-8",
            Method::Post => "Content-Type: application/x-www-form-urlencoded",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: `"get"` is not a method.
impl FromStr for Method {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(ClientError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Status code and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub code: u16,
    pub body: String,
}

/// Build the request text for `method`.
///
/// `method` must be `GET` or `POST`; anything else fails with
/// `UnsupportedMethod` so no connection is ever opened for it. A GET always
/// carries an empty body whatever `body` holds.
pub fn build_payload(method: &str, host: &str, path: &str, body: &str) -> Result<String, ClientError> {
    let method: Method = method.parse()?;
    let body = match method {
        Method::Get => "",
        Method::Post => body,
    };

    Ok(format!(
        "{method} {path} HTTP/1.1\r\n\
         Host: {host}\r\n\
         Accept: */*\r\n\
         {specific}\r\n\
         Content-Length: {length}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}\r\n",
        specific = method.specific_header(),
        length = body.len(),
    ))
}

/// Encode ordered key/value pairs as `application/x-www-form-urlencoded`.
pub fn encode_form<K, V>(args: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in args {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}
