mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use common::{Mock, base_router, serve};
use spotterm::config::Config;
use spotterm::server;
use spotterm::spotify::auth::wait_for_credential;
use spotterm::types::PendingLogin;

fn config(token_url: &str, dir: &TempDir) -> Config {
    let values: HashMap<&str, String> = HashMap::from([
        ("SPOTIFY_API_AUTH_CLIENT_ID", "test-client".to_owned()),
        ("SPOTIFY_API_AUTH_CLIENT_SECRET", "test-secret".to_owned()),
        ("SPOTIFY_API_TOKEN_URL", token_url.to_owned()),
        ("SPOTTERM_DATA_DIR", dir.path().display().to_string()),
    ]);
    Config::from_lookup(|key| values.get(key).cloned()).expect("config")
}

fn pending(state: &str) -> Arc<Mutex<Option<PendingLogin>>> {
    Arc::new(Mutex::new(Some(PendingLogin {
        state: state.to_owned(),
        authorize_url: "https://accounts.spotify.com/authorize?state=s1".to_owned(),
        credential: None,
        failure: None,
    })))
}

/// Serves the login router on an ephemeral port.
async fn login_server(config: Config, state: Arc<Mutex<Option<PendingLogin>>>) -> String {
    let app = server::router(Arc::new(config), state);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_reports_waiting_for_callback() {
    let dir = TempDir::new().expect("tempdir");
    let base = login_server(config("http://127.0.0.1:9/token", &dir), pending("s1")).await;

    let body: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(body["service"], "spotterm");
    assert_eq!(body["status"], "waiting-for-callback");
}

#[tokio::test]
async fn login_redirects_to_authorize_url() {
    let dir = TempDir::new().expect("tempdir");
    let base = login_server(config("http://127.0.0.1:9/token", &dir), pending("s1")).await;

    let http = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client");
    let response = http
        .get(format!("{base}/login"))
        .send()
        .await
        .expect("request");

    assert!(response.status().is_redirection());
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("https://accounts.spotify.com/authorize?state=s1")
    );
}

#[tokio::test]
async fn callback_exchanges_code_for_credential() {
    let mock = Mock::new(
        "",
        vec![(
            200,
            json!({
                "access_token": "A1",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "R1",
                "scope": "user-read-private",
            })
            .to_string(),
        )],
    );
    let token_addr = serve(base_router(), &mock).await;
    let dir = TempDir::new().expect("tempdir");
    let state = pending("s1");
    let base = login_server(
        config(&format!("http://{token_addr}/token"), &dir),
        Arc::clone(&state),
    )
    .await;

    let response = reqwest::get(format!("{base}/callback?code=abc&state=s1"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    let credential = wait_for_credential(state, Duration::from_secs(2))
        .await
        .expect("credential");
    assert_eq!(credential.access_token, "A1");
    assert_eq!(credential.refresh_token, "R1");

    let forms = mock.token_forms.lock().expect("forms").clone();
    assert_eq!(forms.len(), 1);
    assert!(forms[0].contains("grant_type=authorization_code"));
    assert!(forms[0].contains("code=abc"));
}

#[tokio::test]
async fn callback_with_wrong_state_fails_the_login() {
    let mock = Mock::new("", vec![]);
    let token_addr = serve(base_router(), &mock).await;
    let dir = TempDir::new().expect("tempdir");
    let state = pending("s1");
    let base = login_server(
        config(&format!("http://{token_addr}/token"), &dir),
        Arc::clone(&state),
    )
    .await;

    reqwest::get(format!("{base}/callback?code=abc&state=forged"))
        .await
        .expect("request");

    let err = wait_for_credential(state, Duration::from_secs(2))
        .await
        .expect_err("login must fail");
    assert!(err.contains("state mismatch"));
    assert_eq!(mock.token_calls(), 0);
}

#[tokio::test]
async fn callback_with_denied_authorization_fails_the_login() {
    let dir = TempDir::new().expect("tempdir");
    let state = pending("s1");
    let base = login_server(config("http://127.0.0.1:9/token", &dir), Arc::clone(&state)).await;

    reqwest::get(format!("{base}/callback?error=access_denied&state=s1"))
        .await
        .expect("request");

    let err = wait_for_credential(state, Duration::from_secs(2))
        .await
        .expect_err("login must fail");
    assert!(err.contains("access_denied"));
}
