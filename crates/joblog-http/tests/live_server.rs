//! End-to-end tests against a local axum server.
//!
//! The server mimics the job runner: a plain-text full-log endpoint and an
//! SSE endpoint, both behind an optional session cookie.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use futures_util::stream;
use joblog_core::{
    ContainerAttributes, FullLogPort, JobLogViewer, LineSource, LogBuffer, LogContainerPort,
    LogLine, LogSourceError, LogStreamPort,
};
use joblog_http::{HttpClientConfig, HttpLogClient};

const SESSION: &str = "sessionid=secret";

async fn full_log() -> &'static str {
    "line1\nline2\n\nline3\r\nERROR: flaky test\n"
}

async fn broken_full_log() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn job_stream() -> Sse<impl futures_util::Stream<Item = Result<Event, Infallible>>> {
    Sse::new(stream::iter(vec![
        Ok(Event::default().data("build OK")),
        Ok(Event::default().event("progress").data("50%")),
        Ok(Event::default().event("error").data("disk full")),
        Ok(Event::default().data("after close")),
    ]))
}

async fn short_stream() -> Sse<impl futures_util::Stream<Item = Result<Event, Infallible>>> {
    Sse::new(stream::iter(vec![
        Ok(Event::default().data("one")),
        Ok(Event::default().data("two")),
    ]))
}

async fn not_a_stream() -> &'static str {
    "<html>login</html>"
}

async fn private_full_log(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|cookie| cookie.contains(SESSION));
    if authorized {
        (StatusCode::OK, "private line")
    } else {
        (StatusCode::FORBIDDEN, "forbidden")
    }
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/view_job/1/full_log", get(full_log))
        .route("/view_job/1/log", get(job_stream))
        .route("/view_job/2/full_log", get(broken_full_log))
        .route("/view_job/2/log", get(short_stream))
        .route("/view_job/3/log", get(not_a_stream))
        .route("/view_job/4/full_log", get(private_full_log));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Server on another port that records the headers it receives.
async fn spawn_foreign_server() -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let app = Router::new().fallback(move |headers: HeaderMap| {
        let recorder = recorder.clone();
        async move {
            let mut names: Vec<String> = headers.keys().map(|name| name.to_string()).collect();
            recorder.lock().unwrap().append(&mut names);
            "stolen"
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

/// Job server whose endpoints redirect: `/moved/*` to the foreign server,
/// `/view_job/6/full_log` to job 1 on the same origin.
async fn spawn_redirecting_server(foreign: SocketAddr) -> SocketAddr {
    let target = format!("http://{foreign}/stolen");
    let stream_target = target.clone();
    let app = Router::new()
        .route(
            "/moved/full_log",
            get(move || {
                let target = target.clone();
                async move { Redirect::temporary(&target) }
            }),
        )
        .route(
            "/moved/log",
            get(move || {
                let target = stream_target.clone();
                async move { Redirect::temporary(&target) }
            }),
        )
        .route(
            "/view_job/6/full_log",
            get(|| async { Redirect::temporary("/view_job/1/full_log") }),
        )
        .route("/view_job/1/full_log", get(full_log));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> Arc<HttpLogClient> {
    let config = HttpClientConfig::new()
        .with_base_url(format!("http://{addr}/view_job/"))
        .with_session_cookie(SESSION);
    Arc::new(HttpLogClient::new(&config).unwrap())
}

fn viewer_for(
    client: Arc<HttpLogClient>,
    full_log_url: Option<&str>,
    stream_url: Option<&str>,
) -> JobLogViewer<LogBuffer> {
    let attributes = ContainerAttributes::new(
        full_log_url.map(str::to_string),
        stream_url.map(str::to_string),
    );
    JobLogViewer::new(LogBuffer::new(3), attributes, client.clone(), client)
}

#[tokio::test]
async fn full_log_then_stream_until_error_event() {
    let addr = spawn_server().await;
    let viewer = viewer_for(
        client_for(addr),
        Some("/view_job/1/full_log"),
        Some("/view_job/1/log"),
    );

    let buffer = viewer.run().await;

    assert_eq!(
        buffer.texts(),
        vec![
            "line1",
            "line2",
            "line3",
            "ERROR: flaky test",
            "build OK",
            "disk full"
        ]
    );
    let sources: Vec<LineSource> = buffer.lines().iter().map(LogLine::source).collect();
    assert_eq!(&sources[..4], &[LineSource::FullLog; 4]);
    assert_eq!(&sources[4..], &[LineSource::Stream; 2]);

    let flags: Vec<bool> = buffer.lines().iter().map(LogLine::is_error).collect();
    assert_eq!(flags, vec![false, false, false, true, false, true]);
    assert_eq!(buffer.scroll_offset(), buffer.max_scroll_offset());
}

#[tokio::test]
async fn http_500_renders_status_and_still_streams() {
    let addr = spawn_server().await;
    let viewer = viewer_for(
        client_for(addr),
        Some("/view_job/2/full_log"),
        Some("/view_job/2/log"),
    );

    let buffer = viewer.run().await;

    assert_eq!(buffer.len(), 3);
    assert!(buffer.lines()[0].text().contains("500"));
    assert!(buffer.lines()[0].is_error());
    assert_eq!(&buffer.texts()[1..], &["one", "two"]);
}

#[tokio::test]
async fn stream_only_when_full_log_url_missing() {
    let addr = spawn_server().await;
    let viewer = viewer_for(client_for(addr), None, Some("/view_job/2/log"));

    let buffer = viewer.run().await;

    assert_eq!(buffer.texts(), vec!["one", "two"]);
}

#[tokio::test]
async fn non_event_stream_response_closes_quietly() {
    let addr = spawn_server().await;
    let viewer = viewer_for(client_for(addr), None, Some("/view_job/3/log"));

    let buffer = viewer.run().await;

    assert!(buffer.is_empty());
}

#[tokio::test]
async fn session_cookie_sent_to_same_origin() {
    let addr = spawn_server().await;
    let viewer = viewer_for(client_for(addr), Some("/view_job/4/full_log"), None);

    let buffer = viewer.run().await;

    assert_eq!(buffer.texts(), vec!["private line"]);
}

#[tokio::test]
async fn session_cookie_withheld_from_other_origin() {
    let addr = spawn_server().await;
    let config = HttpClientConfig::new()
        .with_base_url("http://ci.example.invalid")
        .with_session_cookie(SESSION);
    let client = Arc::new(HttpLogClient::new(&config).unwrap());
    let absolute = format!("http://{addr}/view_job/4/full_log");
    let viewer = viewer_for(client, Some(&absolute), None);

    let buffer = viewer.run().await;

    assert_eq!(buffer.len(), 1);
    assert!(buffer.lines()[0].text().contains("403"));
}

#[tokio::test]
async fn unreachable_server_renders_failure_line() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let viewer = viewer_for(
        client_for(addr),
        Some("/view_job/1/full_log"),
        Some("/view_job/1/log"),
    );

    let buffer = viewer.run().await;

    assert_eq!(buffer.len(), 1);
    assert!(
        buffer.lines()[0]
            .text()
            .starts_with("Failed to load full log:")
    );
    assert!(buffer.lines()[0].is_error());
}

fn client_with_csrf(addr: SocketAddr) -> HttpLogClient {
    let config = HttpClientConfig::new()
        .with_base_url(format!("http://{addr}"))
        .with_session_cookie(SESSION)
        .with_header("X-CSRFToken", "csrf-secret");
    HttpLogClient::new(&config).unwrap()
}

#[tokio::test]
async fn cross_origin_redirect_is_not_followed() {
    let (foreign, seen) = spawn_foreign_server().await;
    let addr = spawn_redirecting_server(foreign).await;
    let client = client_with_csrf(addr);

    let full = client.fetch_full_log("/moved/full_log").await;
    let stream = client.subscribe("/moved/log").await;

    assert!(matches!(
        full,
        Err(LogSourceError::HttpStatus { status: 307, .. })
    ));
    assert!(matches!(
        stream,
        Err(LogSourceError::HttpStatus { status: 307, .. })
    ));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cross_origin_redirect_renders_status_line() {
    let (foreign, seen) = spawn_foreign_server().await;
    let addr = spawn_redirecting_server(foreign).await;
    let client = Arc::new(client_with_csrf(addr));
    let viewer = viewer_for(client, Some("/moved/full_log"), Some("/moved/log"));

    let buffer = viewer.run().await;

    assert_eq!(buffer.texts(), vec!["Failed to load full log: HTTP 307"]);
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn same_origin_redirect_is_followed() {
    let (foreign, _seen) = spawn_foreign_server().await;
    let addr = spawn_redirecting_server(foreign).await;
    let client = client_with_csrf(addr);

    let body = client.fetch_full_log("/view_job/6/full_log").await.unwrap();

    assert!(body.starts_with("line1\n"));
}
