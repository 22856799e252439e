use tabled::Table;

use crate::{
    config::Config,
    error::ApiError,
    info,
    spotify::{SpotifyClient, search},
    types::{SearchTableRow, SearchTrack},
    utils, warning,
};

const SEARCH_LIMIT: u32 = 10;

/// Searches tracks and prints the matches as a table.
///
/// # Arguments
///
/// * `config` - Loaded application configuration
/// * `words` - Query words, joined with spaces
///
/// # Example
///
/// ```bash
/// spotterm search daft punk around the world
/// ```
pub async fn search(config: &Config, words: &[String]) {
    let query = words.join(" ");
    if query.trim().is_empty() {
        warning!("Nothing to search for");
        return;
    }

    let mut client = match SpotifyClient::new(config).await {
        Ok(c) => c,
        Err(e) => return super::report("Search failed", &ApiError::from(e)),
    };

    let pb = utils::spinner(&format!("Searching for \"{}\"...", query));
    let result = search::tracks(&mut client, &config.api_url, &query, SEARCH_LIMIT).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) if tracks.is_empty() => info!("No tracks found for \"{}\"", query),
        Ok(tracks) => println!("{}", Table::new(search_rows(&tracks))),
        Err(e) => super::report("Search failed", &e),
    }
}

fn search_rows(tracks: &[SearchTrack]) -> Vec<SearchTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| SearchTableRow {
            index: i + 1,
            title: t.name.clone(),
            artists: utils::join_artist_names(&t.artists),
            link: t.external_urls.spotify.clone(),
        })
        .collect()
}
