use std::fmt;

use reqwest::{Method, StatusCode};

use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{CurrentPlayback, PlaybackInfo, PlaybackRequest},
    utils,
};

/// Result of a playback command as reported by the player endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Done,
    /// No Spotify client is active to receive the command.
    NoActiveDevice,
    /// Playback control needs a Spotify Premium account.
    PremiumRequired,
    Failed(StatusCode),
}

impl PlaybackOutcome {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => PlaybackOutcome::Done,
            StatusCode::NOT_FOUND => PlaybackOutcome::NoActiveDevice,
            StatusCode::FORBIDDEN => PlaybackOutcome::PremiumRequired,
            other => PlaybackOutcome::Failed(other),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, PlaybackOutcome::Done)
    }
}

impl fmt::Display for PlaybackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackOutcome::Done => write!(f, "done"),
            PlaybackOutcome::NoActiveDevice => {
                write!(f, "no active device, open Spotify on one of your devices first")
            }
            PlaybackOutcome::PremiumRequired => write!(f, "Spotify Premium is required"),
            PlaybackOutcome::Failed(status) => write!(f, "player returned {}", status),
        }
    }
}

/// Reads what is playing right now.
///
/// Spotify answers `204 No Content` when nothing is playing, which yields a
/// default [`PlaybackInfo`].
pub async fn current(client: &mut SpotifyClient, api_url: &str) -> Result<PlaybackInfo, ApiError> {
    let response = client.get(&format!("{}/me/player", api_url)).await?;
    match response.status() {
        StatusCode::NO_CONTENT => return Ok(PlaybackInfo::default()),
        StatusCode::OK => {}
        _ => return Err(ApiError::from_response(response).await),
    }

    let playback = response.json::<CurrentPlayback>().await?;
    Ok(playback_info(playback))
}

fn playback_info(playback: CurrentPlayback) -> PlaybackInfo {
    match playback.item {
        Some(track) => PlaybackInfo {
            is_playing: playback.is_playing,
            artist_name: utils::join_artist_names(&track.artists),
            track_name: track.name,
            track_uri: track.uri,
        },
        None => PlaybackInfo {
            is_playing: playback.is_playing,
            ..PlaybackInfo::default()
        },
    }
}

/// Starts playback of a context or a list of tracks.
///
/// # Example
///
/// ```
/// let request = PlaybackRequest {
///     context_uri: Some("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M".to_string()),
///     ..Default::default()
/// };
/// match start(&mut client, &config.api_url, &request).await? {
///     PlaybackOutcome::Done => success!("Playing"),
///     outcome => warning!("Couldn't start playback: {}", outcome),
/// }
/// ```
pub async fn start(
    client: &mut SpotifyClient,
    api_url: &str,
    request: &PlaybackRequest,
) -> Result<PlaybackOutcome, ApiError> {
    let body = serde_json::to_value(request).map_err(|e| ApiError::Status {
        status: StatusCode::BAD_REQUEST,
        body: e.to_string(),
    })?;
    command(client, Method::PUT, &format!("{}/me/player/play", api_url), Some(&body)).await
}

/// Resumes the paused playback.
pub async fn resume(client: &mut SpotifyClient, api_url: &str) -> Result<PlaybackOutcome, ApiError> {
    command(client, Method::PUT, &format!("{}/me/player/play", api_url), None).await
}

pub async fn pause(client: &mut SpotifyClient, api_url: &str) -> Result<PlaybackOutcome, ApiError> {
    command(client, Method::PUT, &format!("{}/me/player/pause", api_url), None).await
}

pub async fn next(client: &mut SpotifyClient, api_url: &str) -> Result<PlaybackOutcome, ApiError> {
    command(client, Method::POST, &format!("{}/me/player/next", api_url), None).await
}

pub async fn previous(
    client: &mut SpotifyClient,
    api_url: &str,
) -> Result<PlaybackOutcome, ApiError> {
    command(client, Method::POST, &format!("{}/me/player/previous", api_url), None).await
}

async fn command(
    client: &mut SpotifyClient,
    method: Method,
    url: &str,
    body: Option<&serde_json::Value>,
) -> Result<PlaybackOutcome, ApiError> {
    let response = client.request(method, url, body).await?;
    let outcome = PlaybackOutcome::from_status(response.status());
    if !outcome.is_done() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(url, %outcome, body = %body, "playback command not applied");
    }
    Ok(outcome)
}
