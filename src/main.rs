// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use console_dashboard::application::navigation::LoggingNavigator;
use console_dashboard::application::random::{RandomSource, ThreadRandom};
use console_dashboard::application::session::SessionRegistry;
use console_dashboard::infrastructure::config::load_dashboard_config;
use console_dashboard::infrastructure::simulated_source::SimulatedMetricsSource;
use console_dashboard::presentation::app_state::AppState;
use console_dashboard::presentation::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Simulated telemetry (infrastructure layer)
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);
    let source = Arc::new(SimulatedMetricsSource::new(
        config.timing.refresh_delay(),
        random.clone(),
    ));

    // Session lifecycle (application layer)
    let registry = SessionRegistry::new(&config.timing, random, source);

    let state = Arc::new(AppState {
        registry,
        navigator: Arc::new(LoggingNavigator),
    });

    // Reclaim sessions whose clients went away without unmounting
    let sweep_token = CancellationToken::new();
    let sweep = tokio::spawn({
        let state = state.clone();
        let token = sweep_token.clone();
        async move { state.registry.run_idle_sweep(token).await }
    });

    // Build router (presentation layer)
    let router = build_router(state.clone());

    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!("Starting console-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release every mounted view's timers before exiting
    sweep_token.cancel();
    if let Err(e) = sweep.await {
        tracing::warn!("Idle sweep task failed: {}", e);
    }
    state.registry.teardown_all().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
