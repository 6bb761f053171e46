//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use webhook_receiver::{HttpServer, ReceiverConfig, Shutdown};

/// A receiver running in the background for one test.
pub struct TestReceiver {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestReceiver {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn the real server on an ephemeral port.
pub async fn spawn_receiver() -> TestReceiver {
    spawn_receiver_with(ReceiverConfig::default()).await
}

/// Spawn the real server on an ephemeral port with a custom config.
pub async fn spawn_receiver_with(config: ReceiverConfig) -> TestReceiver {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestReceiver { addr, shutdown }
}

/// Non-pooled client so each request hits a fresh connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
