use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{config::Config, spotify::auth::exchange_code, types::PendingLogin, warning};

/// Redirects the browser to Spotify's authorization page.
pub async fn login(
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingLogin>>>>,
) -> Response {
    let state = shared_state.lock().await;
    match state.as_ref() {
        Some(pending) => Redirect::to(&pending.authorize_url).into_response(),
        None => Html("<h4>No login in progress.</h4>").into_response(),
    }
}

/// Completes the login: validates `state` and exchanges the code.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingLogin>>>>,
    Extension(config): Extension<Arc<Config>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    if let Some(error) = params.get("error") {
        pending.failure = Some(format!("Spotify denied authorization: {}", error));
        return Html("<h4>Login failed.</h4>");
    }

    if params.get("state") != Some(&pending.state) {
        pending.failure = Some("state mismatch in callback".to_string());
        return Html("<h4>Login failed: state mismatch.</h4>");
    }

    let Some(code) = params.get("code") else {
        pending.failure = Some("no authorization code in callback".to_string());
        return Html("<h4>No code in request.</h4>");
    };

    match exchange_code(&Client::new(), &config.oauth, code).await {
        Ok(credential) => {
            pending.credential = Some(credential);
            Html("<h2>Login successful.</h2><p>You can close this tab now.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pending.failure = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
