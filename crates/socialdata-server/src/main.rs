mod api;
mod middleware;

use std::sync::Arc;

use socialdata_core::EngineStore;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(socialdata_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = EngineStore::open(&config.engine_store_path)?;
    store.apply_credentials(
        config.linkedin_client_id.as_deref(),
        config.linkedin_client_secret.as_deref(),
    );
    if !store.load().has_credentials() {
        tracing::warn!(
            "LinkedIn client credentials are not configured; connect will fail until LINKEDIN_CLIENT_ID and LINKEDIN_CLIENT_SECRET are set"
        );
    }

    let auth = AuthState::from_env(matches!(
        config.env,
        socialdata_core::Environment::Development
    ))?;
    let app = build_app(AppState::new(Arc::clone(&config), Arc::new(store)), auth);

    tracing::info!(
        bind_addr = %config.bind_addr,
        callback_url = %config.callback_url(),
        env = %config.env,
        "starting socialdata server"
    );
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
