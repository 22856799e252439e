use std::{future::Future, sync::LazyLock};

use reqwest::{
    Client, Method, Response, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde_json::Value;
use tokio::{sync::Mutex, time::Instant};

use crate::{
    config::Config,
    error::{ClientError, RefreshError},
    management::CredentialStore,
    spotify::auth::TokenRefresher,
    types::Credential,
};

/// Serializes refreshes across every client in the process.
static REFRESH_GATE: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Authenticated client for the Spotify Web API.
///
/// Attaches the in-memory credential as a bearer token to every request.
/// When Spotify answers `401 Unauthorized`, the client refreshes the
/// credential through the token endpoint, persists it, and retries the
/// original request exactly once.
///
/// A client owns its credential exclusively. It is meant to live for a single
/// command or background task; requests take `&mut self` so no locking is
/// needed around the in-memory credential.
///
/// # Example
///
/// ```
/// let mut client = SpotifyClient::new(&config).await?;
/// let response = client.get(&config.api("/me")).await?;
/// if response.status().is_success() {
///     let profile: Profile = response.json().await?;
/// }
/// ```
pub struct SpotifyClient {
    http: Client,
    store: CredentialStore,
    refresher: TokenRefresher,
    credential: Credential,
}

impl SpotifyClient {
    /// Loads the stored credential and builds a client around it.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotLoggedIn`] when no credential has been stored yet
    /// - [`ClientError::CredentialCorrupt`] when the stored file does not parse
    pub async fn new(config: &Config) -> Result<Self, ClientError> {
        let http = Client::builder().build().map_err(ClientError::Http)?;
        let store = CredentialStore::new(config.token_path());
        let refresher = TokenRefresher::new(http.clone(), config.oauth.clone());
        Self::from_store(http, store, refresher).await
    }

    /// Builds a client from explicit parts, loading the credential from `store`.
    pub async fn from_store(
        http: Client,
        store: CredentialStore,
        refresher: TokenRefresher,
    ) -> Result<Self, ClientError> {
        let credential = store.load().await?;
        Ok(SpotifyClient {
            http,
            store,
            refresher,
            credential,
        })
    }

    /// The credential currently used for requests.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub async fn get(&mut self, url: &str) -> Result<Response, ClientError> {
        self.request(Method::GET, url, None).await
    }

    pub async fn post(&mut self, url: &str, body: Option<&Value>) -> Result<Response, ClientError> {
        self.request(Method::POST, url, body).await
    }

    pub async fn put(&mut self, url: &str, body: Option<&Value>) -> Result<Response, ClientError> {
        self.request(Method::PUT, url, body).await
    }

    /// Sends an authenticated request, refreshing and retrying once on 401.
    ///
    /// Any status other than 401 is returned unchanged, including error
    /// statuses; interpreting them is up to the caller. A 401 on the retried
    /// request is returned as-is without a second refresh.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] on network failure of either attempt
    /// - [`ClientError::Refresh`] when the token could not be refreshed or
    ///   persisted; the retried request is not sent in that case
    pub async fn request(
        &mut self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, ClientError> {
        self.request_until(method, url, body, None).await
    }

    /// Like [`request`](Self::request), bounded by an optional deadline.
    ///
    /// The deadline covers the first attempt, the refresh and the retry.
    pub async fn request_until(
        &mut self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        deadline: Option<Instant>,
    ) -> Result<Response, ClientError> {
        let response = within(deadline, self.send(&method, url, body)).await??;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // Drain so the connection can be reused; the body is not surfaced.
        let _ = within(deadline, response.bytes()).await?;

        tracing::info!(%method, url, "access token rejected, refreshing");
        let rejected = self.credential.access_token.clone();
        let refreshed = within(deadline, self.refresh_after_rejection(&rejected))
            .await?
            .map_err(|e| {
                tracing::warn!(error = %e, "token refresh failed");
                ClientError::Refresh(e)
            })?;
        self.credential = refreshed;

        tracing::debug!(%method, url, "retrying with refreshed token");
        within(deadline, self.send(&method, url, body)).await?
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, ClientError> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.credential.access_token);

        if carries_body(method) {
            let payload = match body {
                Some(value) => serde_json::to_vec(value).unwrap_or_default(),
                None => Vec::new(),
            };
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(payload);
        }

        request.send().await.map_err(ClientError::Transport)
    }

    async fn refresh_after_rejection(&self, rejected: &str) -> Result<Credential, RefreshError> {
        let _gate = REFRESH_GATE.lock().await;

        // Another client may have refreshed while this one waited on the gate.
        if let Ok(stored) = self.store.load().await {
            if stored.access_token != rejected && !stored.access_token.is_empty() {
                tracing::debug!("adopting credential refreshed by another client");
                return Ok(stored);
            }
        }

        self.refresher.refresh(&self.credential, &self.store).await
    }
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

async fn within<F: Future>(deadline: Option<Instant>, fut: F) -> Result<F::Output, ClientError> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut)
            .await
            .map_err(|_| ClientError::DeadlineExceeded),
        None => Ok(fut.await),
    }
}
