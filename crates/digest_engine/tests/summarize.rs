use std::time::Duration;

use digest_engine::{
    ClientSettings, ReqwestSummarizer, SummarizeError, Summarizer, GENERIC_ERROR_MESSAGE,
    STRUCTURED_ERROR_FALLBACK,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn summarizer_for(server: &MockServer) -> ReqwestSummarizer {
    summarizer_with(server, ClientSettings::default())
}

fn summarizer_with(server: &MockServer, settings: ClientSettings) -> ReqwestSummarizer {
    ReqwestSummarizer::new(ClientSettings {
        server_url: server.uri(),
        ..settings
    })
    .expect("summarizer")
}

#[tokio::test]
async fn posts_url_once_and_returns_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "url": "https://example.com/post" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "summary": "X" })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = summarizer_for(&server)
        .summarize("https://example.com/post")
        .await
        .expect("summary");
    assert_eq!(summary, "X");
}

#[tokio::test]
async fn json_error_detail_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "Failed to fetch URL content: 404 Client Error"
        })))
        .mount(&server)
        .await;

    let err = summarizer_for(&server)
        .summarize("https://example.com/missing")
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        "Failed to fetch URL content: 404 Client Error"
    );
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn json_error_without_detail_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let err = summarizer_for(&server)
        .summarize("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), STRUCTURED_ERROR_FALLBACK);
}

#[tokio::test]
async fn text_error_reports_status_and_excerpt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let err = summarizer_for(&server)
        .summarize("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Server Error (500): oops");
}

#[tokio::test]
async fn long_html_error_page_is_truncated() {
    let server = MockServer::start().await;
    let page = format!("<html>{}</html>", "x".repeat(1000));
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_raw(page.clone(), "text/html"))
        .mount(&server)
        .await;

    let err = summarizer_for(&server)
        .summarize("https://example.com")
        .await
        .unwrap_err();
    let expected = format!("Server Error (502): {}", &page[..200]);
    assert_eq!(err.user_message(), expected);
}

#[tokio::test]
async fn malformed_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "X" })))
        .mount(&server)
        .await;

    let err = summarizer_for(&server)
        .summarize("https://example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, SummarizeError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_server_times_out_when_a_deadline_is_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "summary": "late" })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    };
    let err = summarizer_with(&server, settings)
        .summarize("https://example.com")
        .await
        .unwrap_err();
    match err {
        SummarizeError::Transport(message) => assert!(message.starts_with("Request timed out")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn slow_server_is_awaited_without_a_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(150))
                .set_body_json(json!({ "summary": "patient" })),
        )
        .mount(&server)
        .await;

    let summary = summarizer_for(&server)
        .summarize("https://example.com")
        .await
        .expect("summary");
    assert_eq!(summary, "patient");
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "0123456789".repeat(10)
        })))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_response_bytes: 32,
        ..ClientSettings::default()
    };
    let err = summarizer_with(&server, settings)
        .summarize("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err, SummarizeError::TooLarge { max_bytes: 32 });
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop a listener so its port is known to be closed.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        format!("http://{}", listener.local_addr().expect("addr"))
    };
    let summarizer = ReqwestSummarizer::new(ClientSettings {
        server_url: uri,
        connect_timeout: Duration::from_secs(2),
        ..ClientSettings::default()
    })
    .expect("summarizer");

    let err = summarizer.summarize("https://example.com").await.unwrap_err();
    assert!(matches!(err, SummarizeError::Transport(_)));
    assert_ne!(err.user_message(), GENERIC_ERROR_MESSAGE);
}
