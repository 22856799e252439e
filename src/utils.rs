use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::types::{Artist, Playlist};

/// Random value echoed back by the OAuth callback to bind it to this login.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

pub fn join_artist_names(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Adds `limit=<limit>` to `href` unless the URL already carries a limit.
///
/// Spotify's `next` links already include their limit, so only the first
/// page request is changed.
pub fn with_default_limit(href: &str, limit: u32) -> Result<String, String> {
    let mut url = Url::parse(href).map_err(|e| format!("invalid URL {}: {}", href, e))?;
    if !url.query_pairs().any(|(key, _)| key == "limit") {
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
    }
    Ok(url.to_string())
}

/// Context URI used to play a whole playlist.
pub fn playlist_context_uri(playlist: &Playlist) -> String {
    if playlist.uri.is_empty() {
        format!("spotify:playlist:{}", playlist.id)
    } else {
        playlist.uri.clone()
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
