//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use subs_server::assembler::{ContentAssembler, RemoteFetcher, FETCH_TIMEOUT};
use subs_server::config::ServerConfig;
use subs_server::http::HttpServer;
use subs_server::lifecycle::Shutdown;
use subs_server::registry::ContentRegistry;
use subs_server::sync::DirectorySync;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// HTTP client that never goes through a system proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap()
}

/// Assembler whose fetches never go through a system proxy.
#[allow(dead_code)]
pub fn assembler() -> ContentAssembler {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(FETCH_TIMEOUT)
        .build()
        .unwrap();
    ContentAssembler::new(RemoteFetcher::with_client(client))
}

/// A running server over a directory.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub registry: Arc<ContentRegistry>,
    pub shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Scan `dir`, start watching it and serve it on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(dir: &Path, debug: bool) -> TestServer {
    let mut config = ServerConfig::default();
    config.source.location = Some(dir.to_path_buf());
    config.observability.debug = debug;
    config.lifecycle.shutdown_grace_secs = 1;

    let registry = Arc::new(ContentRegistry::new());
    let mut sync = DirectorySync::new(dir, registry.clone());
    sync.start().unwrap();

    let server = HttpServer::new(&config, registry.clone(), assembler()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let sync_shutdown = shutdown.subscribe();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = sync.run(sync_shutdown).await;
    });
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        registry,
        shutdown,
    }
}

/// Start a programmable mock backend on an ephemeral port.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        read_request_head(&mut socket).await;
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock backend that always returns `200` with `body`.
#[allow(dead_code)]
pub async fn start_mock_backend(body: &'static str) -> SocketAddr {
    start_programmable_backend(move || async move { (200, body.to_string()) }).await
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}

/// Poll `check` until it returns true or `timeout` elapses.
#[allow(dead_code)]
pub async fn eventually<F>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if check() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}
