#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION};
use axum::routing::{get, post};
use tempfile::TempDir;
use tokio::net::TcpListener;

use spotterm::config::OAuthConfig;
use spotterm::management::CredentialStore;
use spotterm::spotify::SpotifyClient;
use spotterm::spotify::auth::TokenRefresher;
use spotterm::types::Credential;

/// Counters and scripted answers shared by the mock endpoints.
#[derive(Clone, Default)]
pub struct Mock {
    pub token_responses: Arc<Vec<(u16, String)>>,
    pub token_calls: Arc<AtomicU32>,
    pub token_forms: Arc<Mutex<Vec<String>>>,
    pub token_auth: Arc<Mutex<Vec<String>>>,
    pub me_calls: Arc<AtomicU32>,
    /// Access token the resource endpoints accept.
    pub accepted_token: Arc<String>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl Mock {
    pub fn new(accepted_token: &str, token_responses: Vec<(u16, String)>) -> Self {
        Mock {
            token_responses: Arc::new(token_responses),
            accepted_token: Arc::new(accepted_token.to_owned()),
            ..Default::default()
        }
    }

    pub fn token_calls(&self) -> u32 {
        self.token_calls.load(Ordering::Relaxed)
    }

    pub fn me_calls(&self) -> u32 {
        self.me_calls.load(Ordering::Relaxed)
    }

    pub fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.accepted_token);
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected)
    }

    pub fn record(&self, uri: &Uri) {
        self.requests
            .lock()
            .expect("requests lock")
            .push(uri.to_string());
    }

    pub fn recorded(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn token(State(mock): State<Mock>, headers: HeaderMap, body: String) -> (StatusCode, String) {
    let idx = mock.token_calls.fetch_add(1, Ordering::Relaxed) as usize;
    mock.token_forms.lock().expect("forms lock").push(body);
    if let Some(auth) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        mock.token_auth
            .lock()
            .expect("auth lock")
            .push(auth.to_owned());
    }

    let (status, body) = mock
        .token_responses
        .get(idx)
        .or_else(|| mock.token_responses.last())
        .cloned()
        .unwrap_or((500, "{}".to_owned()));
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        body,
    )
}

async fn me(State(mock): State<Mock>, headers: HeaderMap) -> (StatusCode, String) {
    mock.me_calls.fetch_add(1, Ordering::Relaxed);
    if mock.authorized(&headers) {
        (
            StatusCode::OK,
            r#"{"id":"u1","display_name":"User One","external_urls":{"spotify":"https://open.spotify.com/user/u1"}}"#
                .to_owned(),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"status":401,"message":"The access token expired"}}"#.to_owned(),
        )
    }
}

/// Router with the token endpoint and `GET /me`; tests add their own routes.
pub fn base_router() -> Router<Mock> {
    Router::new()
        .route("/token", post(token))
        .route("/me", get(me))
}

pub async fn serve(router: Router<Mock>, mock: &Mock) -> SocketAddr {
    let app = router.with_state(mock.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}

pub fn oauth(token_url: &str) -> OAuthConfig {
    OAuthConfig {
        client_id: "test-client".to_owned(),
        client_secret: "test-secret".to_owned(),
        redirect_uri: "http://localhost:8080/callback".to_owned(),
        scope: "user-read-private".to_owned(),
        auth_url: "http://localhost/authorize".to_owned(),
        token_url: token_url.to_owned(),
    }
}

pub fn credential(access_token: &str, refresh_token: &str) -> Credential {
    Credential {
        access_token: access_token.to_owned(),
        token_type: "Bearer".to_owned(),
        refresh_token: refresh_token.to_owned(),
        scope: "user-read-private".to_owned(),
        expires_in: 3600,
    }
}

pub fn store_in(dir: &TempDir) -> CredentialStore {
    CredentialStore::new(dir.path().join("cache").join("token.json"))
}

/// Client against the mock at `addr`, reading its credential from `store`.
pub async fn client(addr: SocketAddr, store: CredentialStore) -> SpotifyClient {
    let http = reqwest::Client::new();
    let refresher = TokenRefresher::new(http.clone(), oauth(&format!("http://{addr}/token")));
    match SpotifyClient::from_store(http, store, refresher).await {
        Ok(client) => client,
        Err(e) => panic!("client: {e}"),
    }
}
