use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use tokio::sync::{Mutex, oneshot};

use crate::{
    Res,
    config::{Config, OAuthConfig},
    error::RefreshError,
    info,
    management::{CredentialStore, ProfileStore},
    server::start_api_server,
    spotify::{SpotifyClient, profile},
    success,
    types::{Credential, PendingLogin, TokenResponse},
    utils, warning,
};

/// Maximum time the login flow waits for the browser callback.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Grace period for the callback server to shut down after login.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Runs the complete OAuth 2.0 authorization-code login.
///
/// This function orchestrates the entire authentication process:
/// 1. Generating a random `state` value
/// 2. Starting the local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the callback to exchange the code for a credential
/// 5. Shutting the callback server down
/// 6. Persisting the credential and caching the user's profile
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - A callback that never arrives, or arrives with an error, fails the login
/// - Failing to cache the profile is only a warning; the login still succeeds
///
/// # Example
///
/// ```
/// let config = Config::from_env()?;
/// auth::login(&config).await?;
/// ```
pub async fn login(config: &Config) -> Res<()> {
    let state = utils::generate_state();
    let authorize_url = authorize_url(&config.oauth, &state)?;

    let pending = Arc::new(Mutex::new(Some(PendingLogin {
        state,
        authorize_url: authorize_url.to_string(),
        credential: None,
        failure: None,
    })));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server = tokio::spawn(start_api_server(
        config.clone(),
        Arc::clone(&pending),
        shutdown_rx,
    ));

    info!("Waiting for Spotify authorization on {}", config.oauth.redirect_uri);
    if webbrowser::open(authorize_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            authorize_url
        );
    }

    let outcome = wait_for_credential(Arc::clone(&pending), LOGIN_TIMEOUT).await;

    let _ = shutdown_tx.send(());
    match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
        Ok(Ok(Ok(()))) => tracing::debug!("callback server stopped"),
        Ok(Ok(Err(e))) => tracing::warn!(error = %e, "callback server failed"),
        Ok(Err(e)) => tracing::warn!(error = %e, "callback server task panicked"),
        Err(_) => tracing::warn!("callback server did not stop within the grace period"),
    }

    let credential = outcome?;
    CredentialStore::new(config.token_path())
        .save(&credential)
        .await?;
    success!("Login successful!");

    if let Err(e) = cache_profile(config).await {
        warning!("Couldn't fetch profile info: {}", e);
    }

    Ok(())
}

async fn cache_profile(config: &Config) -> Res<()> {
    let mut client = SpotifyClient::new(config).await?;
    let profile = profile::fetch(&mut client, &config.api_url).await?;
    ProfileStore::new(config.profile_path())
        .save(&profile)
        .await?;
    success!(
        "Stored profile of {}",
        profile.display_name.as_deref().unwrap_or(&profile.id)
    );
    Ok(())
}

/// Waits for the callback handler to complete the login.
///
/// Polls the shared state every 250 ms until the callback stored either a
/// credential or a failure, or until `max_wait` elapses.
pub async fn wait_for_credential(
    pending: Arc<Mutex<Option<PendingLogin>>>,
    max_wait: Duration,
) -> Result<Credential, String> {
    let start = tokio::time::Instant::now();

    while start.elapsed() < max_wait {
        {
            let lock = pending.lock().await;
            if let Some(login) = lock.as_ref() {
                if let Some(credential) = &login.credential {
                    return Ok(credential.clone());
                }
                if let Some(failure) = &login.failure {
                    return Err(format!("Login failed: {}", failure));
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    Err("Login timed out waiting for the Spotify callback.".to_string())
}

/// Builds the authorization URL the user is sent to.
pub fn authorize_url(oauth: &OAuthConfig, state: &str) -> Result<Url, String> {
    Url::parse_with_params(
        &oauth.auth_url,
        &[
            ("client_id", oauth.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", oauth.redirect_uri.as_str()),
            ("scope", oauth.scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| format!("invalid authorization URL {}: {}", oauth.auth_url, e))
}

/// Exchanges an authorization code for a credential.
///
/// Authenticates with the application's client id and secret (HTTP basic
/// auth). The authorization code is single-use and expires quickly, so the
/// exchange happens directly in the callback handler.
pub async fn exchange_code(
    http: &Client,
    oauth: &OAuthConfig,
    code: &str,
) -> Result<Credential, RefreshError> {
    let response = http
        .post(&oauth.token_url)
        .basic_auth(&oauth.client_id, Some(&oauth.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", oauth.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(RefreshError::Network)?;

    let token = read_token_response(response).await?;
    Ok(Credential::from(token))
}

async fn read_token_response(response: reqwest::Response) -> Result<TokenResponse, RefreshError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RefreshError::Protocol { status, body });
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(RefreshError::Decode)
}

/// Exchanges refresh tokens for new access tokens at the token endpoint.
#[derive(Debug, Clone)]
pub struct TokenRefresher {
    http: Client,
    oauth: OAuthConfig,
}

impl TokenRefresher {
    pub fn new(http: Client, oauth: OAuthConfig) -> Self {
        TokenRefresher { http, oauth }
    }

    /// Refreshes `current` and persists the merged credential to `store`.
    ///
    /// The merged credential keeps the previous refresh token when Spotify
    /// does not rotate it. It is saved before being returned; a failed save
    /// fails the whole refresh even though the remote exchange succeeded.
    ///
    /// # Errors
    ///
    /// - [`RefreshError::Network`] if the token endpoint is unreachable
    /// - [`RefreshError::Protocol`] on a non-success status, with the body
    /// - [`RefreshError::Decode`] if the response is not a token response
    /// - [`RefreshError::Persist`] if the new credential could not be saved
    pub async fn refresh(
        &self,
        current: &Credential,
        store: &CredentialStore,
    ) -> Result<Credential, RefreshError> {
        let token = self.exchange(&current.refresh_token).await?;
        let merged = current.merge(token);

        store.save(&merged).await.map_err(RefreshError::Persist)?;
        tracing::info!(expires_in = merged.expires_in, "access token refreshed");
        Ok(merged)
    }

    /// Performs the `refresh_token` grant without touching storage.
    pub async fn exchange(&self, refresh_token: &str) -> Result<TokenResponse, RefreshError> {
        let response = self
            .http
            .post(&self.oauth.token_url)
            .basic_auth(&self.oauth.client_id, Some(&self.oauth.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(RefreshError::Network)?;

        read_token_response(response).await
    }
}
