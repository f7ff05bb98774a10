//! Shared utilities for integration tests.

use std::net::SocketAddr;

use semver_router::config::{RouteConfig, RouterConfig};
use semver_router::http::HttpServer;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A running server; dropping the handle's sender stops it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: oneshot::Sender<()>,
    pub task: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Signal shutdown and wait for the server to stop.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        self.task.await.unwrap().unwrap();
    }
}

pub fn route(name: &str, path: &str, range: &str) -> RouteConfig {
    RouteConfig {
        name: name.into(),
        path: path.into(),
        range: range.into(),
        body: format!("{name} body"),
    }
}

/// Start a server on an ephemeral port.
pub async fn start_server(mut config: RouterConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let server = HttpServer::new(config).unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(server.run(listener, async move {
        let _ = rx.await;
    }));

    TestServer { addr, shutdown, task }
}
