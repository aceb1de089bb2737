use fuel_server::config::AppConfig;
use fuel_server::feed::{CachedFeedClient, FeedClient, FeedFetcher};
use fuel_server::sources::uk_retailers;
use fuel_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = run().await {
        error!(error = %e, "fuel server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let client = FeedClient::new(config.feed_client())?;
    let sources = uk_retailers();

    info!(
        sources = sources.len(),
        timeout_ms = config.fetch_timeout.as_millis() as u64,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "starting fuel price server"
    );

    match config.cache() {
        Some(cache_config) => {
            let cached = CachedFeedClient::new(client, &cache_config);
            serve(&config, AppState::new(cached, sources)).await
        }
        None => serve(&config, AppState::new(client, sources)).await,
    }
}

async fn serve<F: FeedFetcher + 'static>(
    config: &AppConfig,
    state: AppState<F>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    info!("  GET  /health           - Health check");
    info!("  GET  /api/fuel?q=...   - Search stations by address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("received shutdown signal, starting graceful shutdown");
}
