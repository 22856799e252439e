use serde::de::DeserializeOwned;

use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{Page, Playlist, PlaylistTrack, Track},
    utils,
};

const PLAYLIST_PAGE_LIMIT: u32 = 50;
const TRACK_PAGE_LIMIT: u32 = 100;

/// URL listing the playlists of `user_id`, or of the current user.
pub fn playlists_url(api_url: &str, user_id: Option<&str>) -> String {
    match user_id {
        Some(id) => format!("{}/users/{}/playlists", api_url, id),
        None => format!("{}/me/playlists", api_url),
    }
}

/// Retrieves every playlist reachable from `href`, following `next` links.
///
/// # Example
///
/// ```
/// let href = playlists_url(&config.api_url, None);
/// let playlists = fetch_all(&mut client, &href).await?;
/// println!("You have {} playlists", playlists.len());
/// ```
pub async fn fetch_all(client: &mut SpotifyClient, href: &str) -> Result<Vec<Playlist>, ApiError> {
    fetch_pages(client, href, PLAYLIST_PAGE_LIMIT).await
}

/// Retrieves every track of a playlist from its `tracks.href`.
///
/// Entries whose track is no longer available are skipped.
pub async fn fetch_all_tracks(
    client: &mut SpotifyClient,
    href: &str,
) -> Result<Vec<Track>, ApiError> {
    let items: Vec<PlaylistTrack> = fetch_pages(client, href, TRACK_PAGE_LIMIT).await?;
    Ok(items.into_iter().filter_map(|item| item.track).collect())
}

async fn fetch_pages<T: DeserializeOwned>(
    client: &mut SpotifyClient,
    href: &str,
    limit: u32,
) -> Result<Vec<T>, ApiError> {
    let mut all = Vec::new();
    let mut next = Some(href.to_string());

    while let Some(href) = next {
        let url = utils::with_default_limit(&href, limit).unwrap_or(href);
        let response = client.get(&url).await?;
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let page = response.json::<Page<T>>().await?;
        tracing::debug!(url = %url, items = page.items.len(), "fetched page");
        all.extend(page.items);
        next = page.next.filter(|n| !n.is_empty());
    }

    Ok(all)
}
