//! Accessors over the raw response text.
//!
//! Parsing is plain substring splitting on the first `\r\n\r\n` and on single
//! spaces in the status line. Header fields are never interpreted, so a
//! malformed header block cannot fail a request that has a usable status line.

use std::num::{IntErrorKind, ParseIntError};

use crate::error::ClientError;

const HEAD_BODY_SEPARATOR: &str = "\r\n\r\n";

/// Everything before the first blank line, or the whole text if there is none.
pub fn parse_headers(response: &str) -> &str {
    match response.split_once(HEAD_BODY_SEPARATOR) {
        Some((head, _)) => head,
        None => response,
    }
}

/// The numeric code from the status line, e.g. `200` for `HTTP/1.1 200 OK`.
///
/// Codes are held as `u16`; a numeric code above 65535 is a `Parse` error
/// reported as out of range.
pub fn parse_status_code(response: &str) -> Result<u16, ClientError> {
    let status_line = parse_headers(response).split("\r\n").next().unwrap_or_default();
    let code = status_line
        .split(' ')
        .nth(1)
        .ok_or_else(|| ClientError::Parse(format!("status line has no code: {status_line:?}")))?;
    code.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => ClientError::Parse(format!("status code {code:?} is out of range")),
        _ => ClientError::Parse(format!("status code {code:?} is not a number: {e}")),
    })
}

/// Everything after the first blank line, or `""` if there is none.
pub fn parse_body(response: &str) -> String {
    match response.split_once(HEAD_BODY_SEPARATOR) {
        Some((_, body)) => body.to_string(),
        None => String::new(),
    }
}
