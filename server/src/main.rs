//! Audio file metadata server.
//!
//! Reads configuration from the environment (and `.env`), creates the database
//! and tables when missing, then serves the CRUD API until Ctrl-C or SIGTERM.
//!
//! Run from repo root: `AUDIO_SERVER_PORT=8000 cargo run -p audiofile-server`

use audiofile_service::{
    app, apply_migrations, connect_pool, ensure_database_exists, telemetry, AppState, PgSessionSource,
    ServerConfig,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = ServerConfig::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = connect_pool(&config.database_url, config.max_connections).await?;
    apply_migrations(&pool, &config.schema).await?;

    let state = AppState::new(PgSessionSource::new(pool.clone(), config.schema.as_str()));
    let router = app(state, config.body_limit);

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
