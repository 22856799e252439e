//! # CLI Module
//!
//! This module provides the command-line interface layer for Spotterm. Every
//! subcommand of the binary maps to one function here, which builds a
//! [`crate::spotify::SpotifyClient`], calls the matching resource operation
//! and presents the result.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`login`] - Runs the authorization code flow and stores the credential
//! - [`me`] - Shows the logged-in user's profile
//!
//! ### Library
//!
//! - [`playlist`] - Interactive playlist browser with optional playback
//! - [`search`] - Track search printed as a table
//!
//! ### Player
//!
//! - [`play`] - Plays a track, playlist or album URI
//! - [`control`] - Pause, resume, next and previous
//!
//! ## Error Handling Philosophy
//!
//! Commands never abort the process on API failures. Each failure is printed
//! with the `warning!` macro and the command returns. When the failure can
//! only be fixed by logging in again (no credential, unreadable credential,
//! rejected refresh token) an extra line tells the user to run
//! `spotterm login`.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotterm login                         # Authorize with Spotify
//! spotterm me                            # Show who is logged in
//! spotterm search massive attack teardrop
//! spotterm play spotify:track:67Hna13dNDkZvBpTXRIaOJ
//! spotterm next
//! spotterm playlist                      # Browse and play a playlist
//! spotterm tui                           # Full-screen player
//! ```
//!
//! ## Dependencies
//!
//! - [`crate::spotify`] - Authenticated client and resource operations
//! - [`crate::management`] - Credential and profile files
//! - [`crate::types`] - Data structures and table rows

mod auth;
mod playback;
mod playlist;
mod profile;
mod search;

pub use auth::login;
pub use playback::{PlayerCommand, control, play, play_request};
pub use playlist::playlist;
pub use profile::me;
pub use search::search;

use crate::{error::ApiError, info, warning};

/// Prints a failed command, adding a login hint when the credential is the
/// problem.
fn report(context: &str, err: &ApiError) {
    warning!("{}: {}", context, err);
    if err.requires_login() {
        info!("Run `spotterm login` to authorize again");
    }
}
