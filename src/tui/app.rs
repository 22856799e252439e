use chrono::{DateTime, Local};
use ratatui::widgets::ListState;

use crate::{
    error::ApiError,
    spotify::playback::PlaybackOutcome,
    types::{PlaybackInfo, PlaybackOffset, PlaybackRequest, Playlist, SearchTrack, Track},
    utils,
};

/// Pane receiving navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Playlists,
    Tracks,
    Search,
    Results,
}

/// Failure reported by a background task, ready for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub requires_login: bool,
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        Failure {
            requires_login: err.requires_login(),
            message: err.to_string(),
        }
    }
}

/// Result of a background task, sent back to the UI loop.
#[derive(Debug, Clone)]
pub enum Message {
    Playlists(Result<Vec<Playlist>, Failure>),
    Tracks {
        playlist: Playlist,
        result: Result<Vec<Track>, Failure>,
    },
    SearchResults {
        query: String,
        result: Result<Vec<SearchTrack>, Failure>,
    },
    Playback(Result<PlaybackInfo, Failure>),
    Command {
        label: String,
        result: Result<PlaybackOutcome, Failure>,
    },
}

impl Message {
    fn is_failure(&self) -> bool {
        match self {
            Message::Playlists(result) => result.is_err(),
            Message::Tracks { result, .. } => result.is_err(),
            Message::SearchResults { result, .. } => result.is_err(),
            Message::Playback(result) => result.is_err(),
            Message::Command { result, .. } => result.is_err(),
        }
    }
}

/// Work requested by a key press, executed off the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadPlaylists,
    LoadTracks(Playlist),
    Search(String),
    Play {
        label: String,
        request: PlaybackRequest,
    },
    Pause,
    Resume,
    Next,
    Previous,
    RefreshPlayback,
}

/// Terminal player state.
pub struct App {
    pub focus: Focus,
    /// Pane to return to when leaving the search box.
    pub last_list_focus: Focus,
    pub should_quit: bool,
    pub show_help: bool,
    pub playlists: Vec<Playlist>,
    pub playlist_state: ListState,
    /// Playlist whose tracks are listed.
    pub open_playlist: Option<Playlist>,
    pub tracks: Vec<Track>,
    pub track_state: ListState,
    pub search_input: String,
    pub results: Vec<SearchTrack>,
    pub result_state: ListState,
    pub playback: PlaybackInfo,
    pub status: String,
    pub status_is_error: bool,
    pub last_update: Option<DateTime<Local>>,
    /// Set once a task failed in a way only a new login can fix.
    pub login_required: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            focus: Focus::Playlists,
            last_list_focus: Focus::Playlists,
            should_quit: false,
            show_help: false,
            playlists: Vec::new(),
            playlist_state: ListState::default(),
            open_playlist: None,
            tracks: Vec::new(),
            track_state: ListState::default(),
            search_input: String::new(),
            results: Vec::new(),
            result_state: ListState::default(),
            playback: PlaybackInfo::default(),
            status: "Loading playlists...".to_string(),
            status_is_error: false,
            last_update: None,
            login_required: false,
        }
    }

    /// Work to run as soon as the UI is up.
    pub fn startup_actions() -> Vec<Action> {
        vec![Action::LoadPlaylists, Action::RefreshPlayback]
    }

    pub fn focus(&mut self, focus: Focus) {
        if focus != Focus::Search {
            self.last_list_focus = focus;
        } else if self.focus != Focus::Search {
            self.last_list_focus = self.focus;
        }
        self.focus = focus;
    }

    pub fn leave_search(&mut self) {
        if self.focus == Focus::Search {
            self.focus = self.last_list_focus;
        }
    }

    /// Cycles through the list panes.
    pub fn focus_next_list(&mut self) {
        let next = match self.focus {
            Focus::Playlists => Focus::Tracks,
            Focus::Tracks => Focus::Results,
            Focus::Results | Focus::Search => Focus::Playlists,
        };
        self.focus(next);
    }

    pub fn select_next(&mut self) {
        if let Some((state, len)) = self.focused_list() {
            let next = match state.selected() {
                Some(i) if i + 1 < len => i + 1,
                Some(i) => i,
                None => 0,
            };
            if len > 0 {
                state.select(Some(next));
            }
        }
    }

    pub fn select_previous(&mut self) {
        if let Some((state, len)) = self.focused_list() {
            if len > 0 {
                let previous = state.selected().map_or(0, |i| i.saturating_sub(1));
                state.select(Some(previous));
            }
        }
    }

    fn focused_list(&mut self) -> Option<(&mut ListState, usize)> {
        match self.focus {
            Focus::Playlists => Some((&mut self.playlist_state, self.playlists.len())),
            Focus::Tracks => Some((&mut self.track_state, self.tracks.len())),
            Focus::Results => Some((&mut self.result_state, self.results.len())),
            Focus::Search => None,
        }
    }

    /// Action for Enter in the focused pane.
    pub fn enter(&mut self) -> Option<Action> {
        match self.focus {
            Focus::Playlists => {
                let playlist = self.playlists.get(self.playlist_state.selected()?)?.clone();
                self.set_status(format!("Loading tracks of {}...", playlist.name));
                Some(Action::LoadTracks(playlist))
            }
            Focus::Tracks => {
                let index = self.track_state.selected()?;
                let track = self.tracks.get(index)?;
                let request = match &self.open_playlist {
                    Some(playlist) => PlaybackRequest {
                        context_uri: Some(utils::playlist_context_uri(playlist)),
                        offset: Some(PlaybackOffset {
                            position: u32::try_from(index).ok(),
                            uri: None,
                        }),
                        ..Default::default()
                    },
                    None => PlaybackRequest {
                        uris: Some(vec![track.uri.clone()]),
                        ..Default::default()
                    },
                };
                Some(Action::Play {
                    label: format!("Playing {}", track.name),
                    request,
                })
            }
            Focus::Search => {
                let query = self.search_input.trim().to_string();
                if query.is_empty() {
                    return None;
                }
                self.set_status(format!("Searching for \"{}\"...", query));
                Some(Action::Search(query))
            }
            Focus::Results => {
                let track = self.results.get(self.result_state.selected()?)?;
                Some(Action::Play {
                    label: format!("Playing {}", track.name),
                    request: PlaybackRequest {
                        uris: Some(vec![track.uri.clone()]),
                        ..Default::default()
                    },
                })
            }
        }
    }

    pub fn toggle_playback(&self) -> Action {
        if self.playback.is_playing {
            Action::Pause
        } else {
            Action::Resume
        }
    }

    /// Applies the result of a background task.
    pub fn apply(&mut self, message: Message) {
        // Any answer from the API proves the credential works again.
        if !message.is_failure() {
            self.login_required = false;
        }
        match message {
            Message::Playlists(Ok(playlists)) => {
                self.set_status(format!("Loaded {} playlists", playlists.len()));
                self.playlist_state
                    .select(if playlists.is_empty() { None } else { Some(0) });
                self.playlists = playlists;
            }
            Message::Tracks {
                playlist,
                result: Ok(tracks),
            } => {
                self.set_status(format!("{}: {} tracks", playlist.name, tracks.len()));
                self.track_state
                    .select(if tracks.is_empty() { None } else { Some(0) });
                self.tracks = tracks;
                self.open_playlist = Some(playlist);
                self.focus(Focus::Tracks);
            }
            Message::SearchResults {
                query,
                result: Ok(results),
            } => {
                self.set_status(format!("{} results for \"{}\"", results.len(), query));
                if results.is_empty() {
                    self.result_state.select(None);
                } else {
                    self.result_state.select(Some(0));
                    self.focus(Focus::Results);
                }
                self.results = results;
            }
            Message::Playback(Ok(info)) => {
                self.playback = info;
                self.last_update = Some(Local::now());
            }
            Message::Command {
                label,
                result: Ok(outcome),
            } => {
                if outcome.is_done() {
                    self.set_status(label);
                } else {
                    self.set_error(outcome.to_string());
                }
            }
            Message::Playlists(Err(failure))
            | Message::Tracks {
                result: Err(failure),
                ..
            }
            | Message::SearchResults {
                result: Err(failure),
                ..
            }
            | Message::Playback(Err(failure))
            | Message::Command {
                result: Err(failure),
                ..
            } => {
                self.login_required |= failure.requires_login;
                self.set_error(failure.message);
            }
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.status_is_error = true;
    }
}
