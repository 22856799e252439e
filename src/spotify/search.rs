use reqwest::Url;

use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{SearchResponse, SearchTrack},
};

/// Builds the track search URL for `query`.
pub fn search_url(api_url: &str, query: &str, limit: u32) -> Result<Url, String> {
    Url::parse_with_params(
        &format!("{}/search", api_url),
        &[
            ("q", query),
            ("type", "track"),
            ("limit", &limit.to_string()),
        ],
    )
    .map_err(|e| format!("invalid search URL: {}", e))
}

/// Searches Spotify's catalog for tracks matching `query`.
///
/// # Arguments
///
/// * `client` - Authenticated client used for the request
/// * `api_url` - Base URL of the Web API
/// * `query` - Free-text search query
/// * `limit` - Maximum number of tracks to return
///
/// # Returns
///
/// The matching tracks in Spotify's relevance order. An empty query yields
/// an empty list without contacting the API.
pub async fn tracks(
    client: &mut SpotifyClient,
    api_url: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<SearchTrack>, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let url = search_url(api_url, query, limit).map_err(|body| ApiError::Status {
        status: reqwest::StatusCode::BAD_REQUEST,
        body,
    })?;

    let response = client.get(url.as_str()).await?;
    if !response.status().is_success() {
        return Err(ApiError::from_response(response).await);
    }

    let result = response.json::<SearchResponse>().await?;
    Ok(result.tracks.items)
}
