use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot};

use crate::{api, config::Config, types::PendingLogin};

/// Builds the router of the local login server.
pub fn router(config: Arc<Config>, state: Arc<Mutex<Option<PendingLogin>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(config))
}

/// Serves the login callback until `shutdown` fires.
pub async fn start_api_server(
    config: Config,
    state: Arc<Mutex<Option<PendingLogin>>>,
    shutdown: oneshot::Receiver<()>,
) -> Result<(), String> {
    let addr = config.server_address;
    let app = router(Arc::new(config), state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind callback server to {}: {}", addr, e))?;
    tracing::debug!(%addr, "callback server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await
        .map_err(|e| e.to_string())
}
