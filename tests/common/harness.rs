//! Test server harness.

use resumatch::embedding::{BertEmbedder, Embedder, EmbedderConfig};
use resumatch::gateway::{HandlerState, create_router_with_state};
use resumatch::normalize::{PrefixStyle, TextNormalizer};
use resumatch::ranking::{BatchRanker, RankerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Clone)]
pub struct TestServerConfig {
    /// `None` runs the stub `BertEmbedder`.
    pub embedder: Option<Arc<dyn Embedder>>,
    pub prefix_style: PrefixStyle,
    pub ranker: RankerConfig,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            embedder: None,
            prefix_style: PrefixStyle::Symmetric,
            ranker: RankerConfig::default(),
        }
    }
}

impl TestServerConfig {
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => tokio::time::sleep(interval).await,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server on an ephemeral port with an in-process embedder.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let embedder = match config.embedder {
        Some(embedder) => embedder,
        None => Arc::new(
            BertEmbedder::load(EmbedderConfig::stub())
                .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
        ),
    };

    let ranker = BatchRanker::new(embedder)
        .with_normalizer(TextNormalizer::new(config.prefix_style))
        .with_config(config.ranker);
    let app = create_router_with_state(HandlerState::new(Arc::new(ranker)));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
