use solosphere_server::core::{AppState, Config};
use solosphere_server::create_router;
use sqlx::mysql::MySqlPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inizializza il logging (RUST_LOG, default info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Inizializza la configurazione
    let config = Config::from_env().inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    config.print_info();

    // Pool di connessioni condiviso da tutte le richieste
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .connect_with(config.connect_options()?)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .inspect_err(|e| error!("Failed to run migrations: {}", e))?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .inspect_err(|e| error!("Database ping failed: {}", e))?;
    info!("Pinged the database, connection is healthy");

    let state = Arc::new(AppState::new(pool, &config));

    // Crea il router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Avvia il server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Attende Ctrl+C o SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
