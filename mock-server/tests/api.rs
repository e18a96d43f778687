use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Fields, INDEX_BODY};
use tower::ServiceExt;

async fn body_fields(response: axum::response::Response) -> Fields {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- index ---

#[tokio::test]
async fn index_serves_greeting() {
    let resp = app().oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, INDEX_BODY.as_bytes());
}

// --- status ---

#[tokio::test]
async fn status_route_answers_with_requested_code() {
    let resp = app().oneshot(get("/status/404")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await, "status 404".as_bytes());
}

#[tokio::test]
async fn status_route_accepts_post() {
    let resp = app().oneshot(form_request("/status/201", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn status_route_rejects_non_numeric_code() {
    let resp = app().oneshot(get("/status/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- echo ---

#[tokio::test]
async fn echo_returns_body_verbatim() {
    let resp = app().oneshot(form_request("/echo", "name=tim")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "name=tim".as_bytes());
}

#[tokio::test]
async fn echo_rejects_get() {
    let resp = app().oneshot(get("/echo")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- headers ---

#[tokio::test]
async fn headers_reports_what_was_sent() {
    let req = Request::builder()
        .uri("/headers")
        .header("Host", "example.com")
        .header("Accept-Charset", "utf-8")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let seen = body_fields(resp).await;
    assert_eq!(seen["host"], "example.com");
    assert_eq!(seen["accept-charset"], "utf-8");
}

// --- form ---

#[tokio::test]
async fn form_decodes_fields() {
    let resp = app()
        .oneshot(form_request("/form", "name=tim&greeting=hello+world"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fields = body_fields(resp).await;
    assert_eq!(fields["name"], "tim");
    assert_eq!(fields["greeting"], "hello world");
}

#[tokio::test]
async fn form_requires_form_content_type() {
    let req = Request::builder()
        .method("POST")
        .uri("/form")
        .body("name=tim".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(get("/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
