//! Shared helpers for socket-level integration tests.
//!
//! Every server binds `127.0.0.1:0` and runs on the test's actix runtime;
//! drop guards are avoided in favour of explicit [`TestServer::stop`] calls.

#![allow(dead_code, reason = "each integration test binary uses a subset")]

use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use checkout_backend::fulfilment_mock::build_server;
use url::Url;

/// Running server plus the base URL clients should use.
pub struct TestServer {
    pub base_url: Url,
    handle: ServerHandle,
}

impl TestServer {
    /// Gracefully stop the server.
    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn ephemeral_listener() -> (TcpListener, Url) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let base_url = Url::parse(&format!("http://{addr}/")).expect("valid base url");
    (listener, base_url)
}

/// Start the fulfilment mock service.
pub fn spawn_fulfilment_mock() -> TestServer {
    let (listener, base_url) = ephemeral_listener();
    let server = build_server(listener, 2).expect("mock server builds");
    let handle = server.handle();
    actix_web::rt::spawn(server);
    TestServer { base_url, handle }
}

/// Canned behaviour for a stub grocery service.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: StatusCode,
    pub body: &'static str,
    pub delay: Duration,
}

impl StubResponse {
    pub fn ok(body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Start a stub that answers every request with `response` and counts hits.
pub fn spawn_stub(response: StubResponse) -> (TestServer, Arc<AtomicUsize>) {
    let (listener, base_url) = ephemeral_listener();
    let hits = Arc::new(AtomicUsize::new(0));
    let server_hits = Arc::clone(&hits);

    let server = HttpServer::new(move || {
        let response = response.clone();
        let hits = Arc::clone(&server_hits);
        App::new().default_service(web::to(move || {
            let response = response.clone();
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                if !response.delay.is_zero() {
                    tokio::time::sleep(response.delay).await;
                }
                HttpResponse::build(response.status)
                    .content_type("application/json")
                    .body(response.body)
            }
        }))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("stub listens")
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    (TestServer { base_url, handle }, hits)
}

/// Base URL of a port nothing listens on.
pub fn closed_port_url() -> Url {
    let (listener, base_url) = ephemeral_listener();
    drop(listener);
    base_url
}

/// Read one HTTP request (headers plus `Content-Length` body) off `stream`.
async fn drain_request(stream: &mut tokio::net::TcpStream) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..read]);
        let Some(header_end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buffer[..header_end]).to_ascii_lowercase();
        let body_len = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buffer.len() >= header_end + 4 + body_len {
            return Ok(());
        }
    }
}

/// Start a raw TCP responder that sends `200 OK` headers promising a body,
/// writes only part of it and closes the connection. Counts requests.
pub async fn spawn_truncated_responder() -> (Url, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let server_hits = Arc::clone(&hits);

    actix_web::rt::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            server_hits.fetch_add(1, Ordering::SeqCst);
            if drain_request(&mut stream).await.is_err() {
                continue;
            }
            let partial = b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 512\r\n\r\n{\"success\":tr";
            let _ = stream.write_all(partial).await;
            let _ = stream.flush().await;
            drop(stream);
        }
    });

    let base_url = Url::parse(&format!("http://{addr}/")).expect("valid base url");
    (base_url, hits)
}
