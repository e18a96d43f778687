use std::collections::BTreeMap;

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use tokio::net::TcpListener;

pub mod raw;

pub use raw::{serve_once, RawServer};

/// Body served by `GET /`.
pub const INDEX_BODY: &str = "hello from mock-server";

pub type Fields = BTreeMap<String, String>;

pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/status/{code}", get(status).post(status))
        .route("/echo", post(echo))
        .route("/headers", get(headers).post(headers))
        .route("/form", post(form))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("mock-server serving on {addr}");
    }
    axum::serve(listener, app()).await
}

async fn index() -> &'static str {
    INDEX_BODY
}

/// Answer with the status named in the path and a body naming it too.
async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, format!("status {code}")))
}

async fn echo(body: String) -> String {
    body
}

/// The request headers as the server saw them, names lowercased.
async fn headers(headers: HeaderMap) -> Json<Fields> {
    let seen = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(seen)
}

async fn form(Form(fields): Form<Fields>) -> Json<Fields> {
    Json(fields)
}
