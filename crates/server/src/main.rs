use afgscan_core::{config::AppConfig, Explorer};
use anyhow::Result;
use server::{api::ApiState, router};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,afgscan_core=info,server=info";

/// Maps a level name or a full directive string to a filter. A bare level
/// applies to the explorer crates only, so dependencies stay at `warn`.
fn log_filter(level: &str) -> EnvFilter {
    match level {
        "" | "info" => EnvFilter::new(DEFAULT_FILTER),
        "debug" | "trace" | "warn" | "error" => {
            EnvFilter::new(format!("warn,afgscan_core={level},server={level}"))
        }
        directives => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    }
}

fn init_logging(config: &AppConfig) {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    let registry = tracing_subscriber::registry().with(log_filter(&level));

    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config =
        AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;
    config.validate().map_err(|e| anyhow::anyhow!("Configuration validation failed: {e}"))?;

    init_logging(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting AFGScan explorer API");
    debug!(
        rpc_configured = config.rpc.url.is_some(),
        indexer_configured = config.indexer.url.is_some(),
        mode = ?config.stats.total_transactions_mode,
        "Configuration loaded"
    );

    let explorer = Explorer::from_config(&config)?;
    let app = router::create_app(ApiState::new(Arc::new(explorer)), &config.server);

    let addr = config.socket_addr().map_err(|e| anyhow::anyhow!(e))?;
    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "Explorer API listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                () = std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
