use crate::{
    config::Config,
    error::ApiError,
    info,
    spotify::{SpotifyClient, playback},
    success,
    types::{PlaybackOffset, PlaybackRequest},
    warning,
};

/// Player commands available from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Pause,
    Resume,
    Next,
    Previous,
}

impl PlayerCommand {
    fn label(&self) -> &'static str {
        match self {
            PlayerCommand::Pause => "Paused",
            PlayerCommand::Resume => "Resumed",
            PlayerCommand::Next => "Skipped to next track",
            PlayerCommand::Previous => "Back to previous track",
        }
    }
}

/// Builds the request that plays `uri`.
///
/// Track URIs are queued as a single-item list, anything else (playlist,
/// album, artist) is played as a context.
pub fn play_request(uri: &str) -> PlaybackRequest {
    if uri.starts_with("spotify:track:") {
        PlaybackRequest {
            uris: Some(vec![uri.to_string()]),
            ..Default::default()
        }
    } else {
        PlaybackRequest {
            context_uri: Some(uri.to_string()),
            offset: Some(PlaybackOffset {
                position: Some(0),
                uri: None,
            }),
            ..Default::default()
        }
    }
}

pub async fn play(config: &Config, uri: &str) {
    let mut client = match SpotifyClient::new(config).await {
        Ok(c) => c,
        Err(e) => return super::report("Couldn't start playback", &ApiError::from(e)),
    };

    match playback::start(&mut client, &config.api_url, &play_request(uri)).await {
        Ok(outcome) if outcome.is_done() => success!("Playing {}", uri),
        Ok(outcome) => warning!("Couldn't start playback: {}", outcome),
        Err(e) => super::report("Couldn't start playback", &e),
    }
}

pub async fn control(config: &Config, command: PlayerCommand) {
    let mut client = match SpotifyClient::new(config).await {
        Ok(c) => c,
        Err(e) => return super::report("Player command failed", &ApiError::from(e)),
    };

    let api_url = &config.api_url;
    let result = match command {
        PlayerCommand::Pause => playback::pause(&mut client, api_url).await,
        PlayerCommand::Resume => playback::resume(&mut client, api_url).await,
        PlayerCommand::Next => playback::next(&mut client, api_url).await,
        PlayerCommand::Previous => playback::previous(&mut client, api_url).await,
    };

    match result {
        Ok(outcome) if outcome.is_done() => success!("{}", command.label()),
        Ok(outcome) => return warning!("Player command failed: {}", outcome),
        Err(e) => return super::report("Player command failed", &e),
    }

    if matches!(command, PlayerCommand::Next | PlayerCommand::Previous) {
        // The player needs a moment before it reports the new track.
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        if let Ok(now) = playback::current(&mut client, api_url).await {
            if !now.track_name.is_empty() {
                info!("Now playing {} by {}", now.track_name, now.artist_name);
            }
        }
    }
}
