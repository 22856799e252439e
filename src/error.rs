//! Error types for credential storage, token refresh and API calls.
//!
//! The layering follows the request path: [`StoreError`] is raised by the
//! on-disk credential store, [`RefreshError`] by the refresh protocol (which
//! may wrap a `StoreError` when persisting fails), [`ClientError`] by the
//! authenticated client, and [`ApiError`] by the resource operations built on
//! top of the client.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No credential has ever been stored at this path.
    #[error("no credential stored at {}", .0.display())]
    NotFound(PathBuf),

    /// The stored file exists but is not a valid credential.
    #[error("stored credential is malformed: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("credential storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the refresh-token exchange.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("token endpoint unreachable: {0}")]
    Network(#[source] reqwest::Error),

    /// The token endpoint answered with a non-success status.
    #[error("token endpoint returned {status}: {body}")]
    Protocol { status: StatusCode, body: String },

    #[error("token endpoint response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    /// The exchange succeeded remotely but the new credential was not saved.
    #[error("refreshed credential could not be persisted: {0}")]
    Persist(#[source] StoreError),
}

/// Failures surfaced by [`crate::spotify::SpotifyClient`].
///
/// Non-2xx statuses other than 401 are never errors at this level; they are
/// returned as regular responses.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not logged in, run `spotterm login` first")]
    NotLoggedIn,

    #[error("stored credential is unreadable ({0}), run `spotterm login` again")]
    CredentialCorrupt(#[source] serde_json::Error),

    #[error("credential storage failed: {0}")]
    Storage(#[source] std::io::Error),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("token refresh failed ({0}), run `spotterm login` again")]
    Refresh(#[source] RefreshError),

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("failed to build HTTP client: {0}")]
    Http(#[source] reqwest::Error),
}

impl ClientError {
    /// Whether the user has to run the login flow again to recover.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::NotLoggedIn | ClientError::CredentialCorrupt(_) | ClientError::Refresh(_)
        )
    }
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ClientError::NotLoggedIn,
            StoreError::Corrupt(e) => ClientError::CredentialCorrupt(e),
            StoreError::Io(e) => ClientError::Storage(e),
        }
    }
}

/// Failures of the resource operations (profile, playlists, search, playback).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Spotify answered with a status the operation cannot use.
    #[error("Spotify API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode Spotify API response: {0}")]
    Decode(#[from] reqwest::Error),
}

impl ApiError {
    pub fn requires_login(&self) -> bool {
        match self {
            ApiError::Client(e) => e.requires_login(),
            _ => false,
        }
    }

    /// Consumes a response that did not carry the expected status.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::Status { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_not_logged_in() {
        let err: ClientError = StoreError::NotFound(PathBuf::from("/tmp/token.json")).into();
        assert!(matches!(err, ClientError::NotLoggedIn));
        assert!(err.requires_login());
        assert_eq!(err.to_string(), "not logged in, run `spotterm login` first");
    }

    #[test]
    fn store_corrupt_maps_to_credential_corrupt() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ClientError = StoreError::Corrupt(parse).into();
        assert!(matches!(err, ClientError::CredentialCorrupt(_)));
        assert!(err.requires_login());
    }

    #[test]
    fn refresh_failure_requires_login() {
        let err = ClientError::Refresh(RefreshError::Protocol {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"error":"invalid_grant"}"#.to_string(),
        });
        assert!(err.requires_login());
        assert_eq!(
            err.to_string(),
            "token refresh failed (token endpoint returned 400 Bad Request: {\"error\":\"invalid_grant\"}), run `spotterm login` again"
        );
    }

    #[test]
    fn transport_and_deadline_do_not_require_login() {
        assert!(!ClientError::DeadlineExceeded.requires_login());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!ClientError::Storage(io).requires_login());
    }

    #[test]
    fn api_status_error_message() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Spotify API returned 404 Not Found: missing");
        assert!(!err.requires_login());
        assert!(ApiError::Client(ClientError::NotLoggedIn).requires_login());
    }
}
