//! Scripted single-shot responder on a plain `std::net::TcpListener`.
//!
//! # Design
//! Some checks need exact bytes on both sides: a response with no headers at
//! all, or the literal request a client put on the wire. The axum app cannot
//! give either, so this module accepts one connection, records the request,
//! writes a canned reply verbatim and closes its write half. It then keeps
//! reading until the client hangs up, which captures any bytes the client
//! sent after its declared body and avoids resetting the connection on it.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

const MAX_HEADERS: usize = 32;

/// A request as received by the raw responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    /// The first `Content-Length` bytes after the head.
    pub body: String,
    /// Every byte received on the connection.
    pub raw: String,
}

impl CapturedRequest {
    /// First header with `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Handle on a responder that serves exactly one connection.
pub struct RawServer {
    addr: SocketAddr,
    handle: JoinHandle<io::Result<CapturedRequest>>,
}

impl RawServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://<addr><path>`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Wait for the exchange to finish and return what the client sent.
    pub fn request(self) -> io::Result<CapturedRequest> {
        self.handle
            .join()
            .map_err(|_| io::Error::other("raw responder thread panicked"))?
    }
}

/// Bind an ephemeral local port and answer its first connection with `reply`.
pub fn serve_once(reply: impl Into<Vec<u8>>) -> io::Result<RawServer> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let reply = reply.into();
    let handle = thread::spawn(move || exchange(&listener, &reply));
    Ok(RawServer { addr, handle })
}

fn exchange(listener: &TcpListener, reply: &[u8]) -> io::Result<CapturedRequest> {
    let (mut stream, peer) = listener.accept()?;
    log::debug!("raw responder accepted {peer}");

    let mut received = Vec::new();
    let mut chunk = [0_u8; 1024];
    let (method, path, headers, head_len) = loop {
        if let Some(head) = parse_head(&received)? {
            break head;
        }
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "client closed before sending a full request head",
            ));
        }
        received.extend_from_slice(&chunk[..n]);
    };

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .map(|(_, value)| value.trim().parse::<usize>())
        .transpose()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        .unwrap_or(0);
    while received.len() < head_len + content_length {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        received.extend_from_slice(&chunk[..n]);
    }
    let body_end = received.len().min(head_len + content_length);
    let body = String::from_utf8_lossy(&received[head_len..body_end]).into_owned();

    stream.write_all(reply)?;
    stream.flush()?;
    stream.shutdown(Shutdown::Write)?;
    stream.read_to_end(&mut received)?;

    Ok(CapturedRequest {
        method,
        path,
        headers,
        body,
        raw: String::from_utf8_lossy(&received).into_owned(),
    })
}

type Head = (String, String, Vec<(String, String)>, usize);

/// `None` until the whole head has arrived.
fn parse_head(buf: &[u8]) -> io::Result<Option<Head>> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut request = httparse::Request::new(&mut headers);
    let head_len = match request
        .parse(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    {
        httparse::Status::Complete(len) => len,
        httparse::Status::Partial => return Ok(None),
    };

    let fields = request
        .headers
        .iter()
        .map(|h| (h.name.to_string(), String::from_utf8_lossy(h.value).into_owned()))
        .collect();
    Ok(Some((
        request.method.unwrap_or_default().to_string(),
        request.path.unwrap_or_default().to_string(),
        fields,
        head_len,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpStream;

    #[test]
    fn captures_request_and_sends_reply_verbatim() {
        let server = serve_once("HTTP/1.1 204 No Content\r\n\r\n").unwrap();

        let mut client = TcpStream::connect(server.addr()).unwrap();
        client
            .write_all(b"POST /x HTTP/1.1\r\nHost: h\r\nContent-Length: 3\r\n\r\nabc\r\n")
            .unwrap();
        let mut reply = String::new();
        client.read_to_string(&mut reply).unwrap();
        drop(client);

        let captured = server.request().unwrap();
        assert_eq!(reply, "HTTP/1.1 204 No Content\r\n\r\n");
        assert_eq!(captured.method, "POST");
        assert_eq!(captured.path, "/x");
        assert_eq!(captured.header("host"), Some("h"));
        assert_eq!(captured.body, "abc");
        assert!(captured.raw.ends_with("abc\r\n"));
    }

    #[test]
    fn url_points_at_bound_address() {
        let server = serve_once("").unwrap();
        let url = server.url("/path");
        assert_eq!(url, format!("http://{}/path", server.addr()));
        // Let the responder finish.
        drop(TcpStream::connect(server.addr()).unwrap());
        assert!(server.request().is_err());
    }
}
