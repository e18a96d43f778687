//! Resolution of a URL string into the `(host, port, path)` a request needs.

use url::{Host, Url};

/// Port used when the URL names none.
pub const DEFAULT_PORT: u16 = 80;

/// Path used when the URL has an empty path.
pub const DEFAULT_PATH: &str = "/";

/// Where a single request goes. Built once per request and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
}

/// Split `url` into host, port and path.
///
/// This never fails. A string the URL grammar rejects resolves to an empty
/// host, which makes the later connect step fail instead. The path is taken
/// as written (no percent-decoding) and excludes the query and fragment.
pub fn resolve(url: &str) -> Endpoint {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("could not parse url {url:?}: {e}");
            return Endpoint {
                host: String::new(),
                port: DEFAULT_PORT,
                path: DEFAULT_PATH.to_string(),
            };
        }
    };

    let host = match parsed.host() {
        // Brackets belong to the URL syntax, not to the address.
        Some(Host::Ipv6(addr)) => addr.to_string(),
        Some(host) => host.to_string(),
        None => String::new(),
    };

    let path = match parsed.path() {
        "" => DEFAULT_PATH.to_string(),
        path => path.to_string(),
    };

    Endpoint {
        host,
        port: parsed.port().unwrap_or(DEFAULT_PORT),
        path,
    }
}
