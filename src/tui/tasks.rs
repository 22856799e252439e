use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc::{UnboundedSender, error::SendError};

use super::app::{Action, Failure, Message};
use crate::{
    config::Config,
    error::ApiError,
    management::ProfileStore,
    spotify::{
        SpotifyClient,
        playback::{self, PlaybackOutcome},
        playlists, search,
    },
};

const SEARCH_LIMIT: u32 = 30;

/// Delay before reading the player state after a command.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Runs `action` on its own task and reports back over `tx`.
///
/// Each task builds its own [`SpotifyClient`], so a slow request never
/// blocks the UI loop or another task.
pub fn spawn(action: Action, config: Arc<Config>, tx: UnboundedSender<Message>) {
    tokio::spawn(async move {
        if run(action, &config, &tx).await.is_err() {
            tracing::debug!("ui closed before the task finished");
        }
    });
}

async fn run(
    action: Action,
    config: &Config,
    tx: &UnboundedSender<Message>,
) -> Result<(), SendError<Message>> {
    let mut client = match SpotifyClient::new(config).await {
        Ok(client) => client,
        Err(e) => return tx.send(failed(action, ApiError::from(e).into())),
    };
    let api_url = config.api_url.as_str();

    match action {
        Action::LoadPlaylists => {
            let user_id = ProfileStore::new(config.profile_path())
                .load()
                .await
                .ok()
                .map(|p| p.id);
            let href = playlists::playlists_url(api_url, user_id.as_deref());
            let result = playlists::fetch_all(&mut client, &href).await;
            tx.send(Message::Playlists(result.map_err(Failure::from)))
        }
        Action::LoadTracks(playlist) => {
            let result = playlists::fetch_all_tracks(&mut client, &playlist.tracks.href).await;
            tx.send(Message::Tracks {
                playlist,
                result: result.map_err(Failure::from),
            })
        }
        Action::Search(query) => {
            let result = search::tracks(&mut client, api_url, &query, SEARCH_LIMIT).await;
            tx.send(Message::SearchResults {
                query,
                result: result.map_err(Failure::from),
            })
        }
        Action::RefreshPlayback => {
            let result = playback::current(&mut client, api_url).await;
            tx.send(Message::Playback(result.map_err(Failure::from)))
        }
        Action::Play { label, request } => {
            let result = playback::start(&mut client, api_url, &request).await;
            report_command(&mut client, api_url, tx, label, result).await
        }
        Action::Pause => {
            let result = playback::pause(&mut client, api_url).await;
            report_command(&mut client, api_url, tx, "Paused".to_string(), result).await
        }
        Action::Resume => {
            let result = playback::resume(&mut client, api_url).await;
            report_command(&mut client, api_url, tx, "Resumed".to_string(), result).await
        }
        Action::Next => {
            let result = playback::next(&mut client, api_url).await;
            report_command(&mut client, api_url, tx, "Next track".to_string(), result).await
        }
        Action::Previous => {
            let result = playback::previous(&mut client, api_url).await;
            report_command(&mut client, api_url, tx, "Previous track".to_string(), result).await
        }
    }
}

/// Sends the command outcome, then the player state once it has settled.
async fn report_command(
    client: &mut SpotifyClient,
    api_url: &str,
    tx: &UnboundedSender<Message>,
    label: String,
    result: Result<PlaybackOutcome, ApiError>,
) -> Result<(), SendError<Message>> {
    let applied = matches!(result, Ok(outcome) if outcome.is_done());
    tx.send(Message::Command {
        label,
        result: result.map_err(Failure::from),
    })?;

    if applied {
        tokio::time::sleep(SETTLE_DELAY).await;
        let result = playback::current(client, api_url).await;
        tx.send(Message::Playback(result.map_err(Failure::from)))?;
    }
    Ok(())
}

/// Message reporting that `action` could not even start.
fn failed(action: Action, failure: Failure) -> Message {
    match action {
        Action::LoadPlaylists => Message::Playlists(Err(failure)),
        Action::LoadTracks(playlist) => Message::Tracks {
            playlist,
            result: Err(failure),
        },
        Action::Search(query) => Message::SearchResults {
            query,
            result: Err(failure),
        },
        Action::RefreshPlayback => Message::Playback(Err(failure)),
        Action::Play { label, .. } => Message::Command {
            label,
            result: Err(failure),
        },
        Action::Pause | Action::Resume | Action::Next | Action::Previous => Message::Command {
            label: "Player command".to_string(),
            result: Err(failure),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn failed_keeps_the_action_context() {
        let failure: Failure = ApiError::from(ClientError::NotLoggedIn).into();
        match failed(Action::Search("air".to_string()), failure.clone()) {
            Message::SearchResults { query, result } => {
                assert_eq!(query, "air");
                assert_eq!(result.unwrap_err(), failure);
            }
            other => panic!("unexpected message {:?}", other),
        }
        assert!(matches!(
            failed(Action::Next, failure),
            Message::Command { result: Err(_), .. }
        ));
    }
}
