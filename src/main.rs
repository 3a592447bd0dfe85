//! Marathon Results - Application Entry Point

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use marathon_results::{
    config::{CONFIG, LogFormat},
    db, handlers,
    services::AuthService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting marathon results server...");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    AuthService::ensure_admin(&db_pool, &CONFIG.admin).await?;

    tracing::info!("Connecting to Redis...");
    let redis_client = redis::Client::open(CONFIG.redis.url.as_str())?;

    let state = AppState::new(db_pool, redis_client, CONFIG.clone());
    state.redis().await?;
    let app = handlers::router(state);

    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(CONFIG.server.rust_log.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    match CONFIG.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
