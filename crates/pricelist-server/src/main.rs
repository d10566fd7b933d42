mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use pricelist_catalog::{OfflineProvider, Pipeline};
use pricelist_core::LookupProvider;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pricelist_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = if config.database_url.is_some() {
        let pool = pricelist_db::connect_pool_from_config(&config).await?;
        pricelist_db::run_migrations(&pool).await?;
        Some(pool)
    } else {
        tracing::warn!("DATABASE_URL not set; serving the fallback catalog");
        None
    };

    let provider: Arc<dyn LookupProvider> = match &pool {
        Some(pool) => Arc::new(pricelist_db::PgLookupProvider::new(pool.clone())),
        None => Arc::new(OfflineProvider),
    };
    let pipeline = Pipeline::new(provider, Duration::from_secs(config.lookup_timeout_secs));

    let app = build_app(
        AppState {
            pipeline: Arc::new(pipeline),
            pool,
        },
        config.max_upload_bytes,
    );

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "pricelist server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
