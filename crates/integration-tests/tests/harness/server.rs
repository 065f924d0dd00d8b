//! Beo running in-process on an ephemeral port

use std::time::Duration;

use beo_config::Config;
use beo_server::Server;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Upper bound for any single request a test makes
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Running server, stopped when dropped
pub struct TestServer {
    base_url: String,
    client: reqwest::Client,
    shutdown: CancellationToken,
}

impl TestServer {
    /// Build a server from `config` and serve it on `127.0.0.1:0`
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let router = Server::new(&config)?.into_router();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let shutdown = CancellationToken::new();
        let stopped = shutdown.clone().cancelled_owned();
        tokio::spawn(async move {
            axum::serve(listener, router).with_graceful_shutdown(stopped).await.ok();
        });

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url,
            client,
            shutdown,
        })
    }

    /// Absolute URL for `path`
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
