//! Resumatch HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use resumatch::config::Config;
use resumatch::embedding::{BertEmbedder, CachedEmbedder, Embedder, EmbedderConfig};
use resumatch::gateway::{HandlerState, create_router_with_state};
use resumatch::normalize::TextNormalizer;
use resumatch::ranking::BatchRanker;
use resumatch::scoring::Classifier;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
 ┬─┐┌─┐┌─┐┬ ┬┌┬┐┌─┐┌┬┐┌─┐┬ ┬
 ├┬┘├┤ └─┐│ ││││├─┤ │ │  ├─┤
 ┴└─└─┘└─┘└─┘┴ ┴┴ ┴ ┴ └─┘┴ ┴

        READ. EMBED. RANK.
                                AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        prefix_style = ?config.prefix_style,
        max_concurrency = config.max_concurrency,
        "Resumatch starting"
    );

    let selected = config.selected_model_path();
    if let Some(path) = selected {
        let variant = if config.fine_tuned_model_path.is_some() {
            "fine-tuned"
        } else {
            "base"
        };
        tracing::info!(path = %path.display(), variant, "Loading embedding model");
    }

    let embedder = BertEmbedder::load(EmbedderConfig::from_selection(
        selected,
        config.max_seq_len,
    ))?;
    tracing::info!(
        embedding_dim = embedder.embedding_dim(),
        stub = embedder.is_stub(),
        "Embedder ready"
    );

    let embedder: Arc<dyn Embedder> = if config.embed_cache_capacity > 0 {
        tracing::info!(
            capacity = config.embed_cache_capacity,
            "Embedding cache enabled"
        );
        Arc::new(CachedEmbedder::new(embedder, config.embed_cache_capacity))
    } else {
        Arc::new(embedder)
    };

    let ranker = BatchRanker::new(embedder)
        .with_normalizer(TextNormalizer::new(config.prefix_style))
        .with_classifier(Classifier::new(config.tier_thresholds()))
        .with_config(config.ranker_config());

    let app = create_router_with_state(HandlerState::new(Arc::new(ranker)));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Resumatch shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("RESUMATCH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(resumatch::constants::DEFAULT_PORT);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
