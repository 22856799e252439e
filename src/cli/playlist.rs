use dialoguer::{Confirm, Select};
use tabled::Table;

use crate::{
    config::Config,
    error::ApiError,
    info,
    management::ProfileStore,
    spotify::{SpotifyClient, playback, playlists},
    success,
    types::{PlaybackRequest, Playlist, PlaylistTableRow, Track, TrackTableRow},
    utils, warning,
};

/// Interactive playlist browser.
///
/// Lists the user's playlists, lets the user pick one, prints its tracks and
/// offers to start playing it.
pub async fn playlist(config: &Config) {
    let mut client = match SpotifyClient::new(config).await {
        Ok(c) => c,
        Err(e) => return super::report("Couldn't load playlists", &ApiError::from(e)),
    };

    // Listing by user id needs the profile cached at login; /me works without.
    let user_id = ProfileStore::new(config.profile_path())
        .load()
        .await
        .ok()
        .map(|p| p.id);
    let href = playlists::playlists_url(&config.api_url, user_id.as_deref());

    let pb = utils::spinner("Loading playlists...");
    let result = playlists::fetch_all(&mut client, &href).await;
    pb.finish_and_clear();

    let all = match result {
        Ok(all) => all,
        Err(e) => return super::report("Couldn't load playlists", &e),
    };

    if all.is_empty() {
        info!("No playlists found");
        return;
    }

    println!("{}", Table::new(playlist_rows(&all)));

    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    let selection = match Select::new()
        .with_prompt("Choose a playlist")
        .items(&names)
        .default(0)
        .interact_opt()
    {
        Ok(Some(index)) => index,
        Ok(None) => return,
        Err(e) => return warning!("Selection failed: {}", e),
    };
    let chosen = &all[selection];

    let pb = utils::spinner(&format!("Loading tracks of {}...", chosen.name));
    let result = playlists::fetch_all_tracks(&mut client, &chosen.tracks.href).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) if tracks.is_empty() => info!("{} has no tracks", chosen.name),
        Ok(tracks) => println!("{}", Table::new(track_rows(&tracks))),
        Err(e) => return super::report("Couldn't load tracks", &e),
    }

    let play = Confirm::new()
        .with_prompt(format!("Play {}?", chosen.name))
        .default(false)
        .interact()
        .unwrap_or(false);
    if !play {
        return;
    }

    let request = PlaybackRequest {
        context_uri: Some(utils::playlist_context_uri(chosen)),
        ..Default::default()
    };
    match playback::start(&mut client, &config.api_url, &request).await {
        Ok(outcome) if outcome.is_done() => success!("Playing {}", chosen.name),
        Ok(outcome) => warning!("Couldn't start playback: {}", outcome),
        Err(e) => super::report("Couldn't start playback", &e),
    }
}

fn playlist_rows(all: &[Playlist]) -> Vec<PlaylistTableRow> {
    all.iter()
        .enumerate()
        .map(|(i, p)| PlaylistTableRow {
            index: i + 1,
            name: p.name.clone(),
            tracks: p
                .tracks
                .total
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            index: i + 1,
            title: t.name.clone(),
            artists: utils::join_artist_names(&t.artists),
        })
        .collect()
}
