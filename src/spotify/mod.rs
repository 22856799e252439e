//! # Spotify Integration Module
//!
//! This module is the integration layer between Spotterm and the Spotify Web
//! API. Every request made on behalf of the user goes through
//! [`SpotifyClient`], which attaches the stored credential and recovers from
//! expired access tokens on its own.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, TUI)
//!          ↓
//! Resource Operations
//!     ├── Profile   (GET /me)
//!     ├── Playlists (paginated listings)
//!     ├── Search    (track search)
//!     └── Playback  (player commands)
//!          ↓
//! SpotifyClient (bearer auth, refresh on 401, retry once)
//!          ↓
//! TokenRefresher + CredentialStore
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Authorization code flow and token refresh:
//! - **Login Flow**: Opens the browser, waits for the local callback server and
//!   stores the resulting credential
//! - **Code Exchange**: Trades the authorization code for a token set
//! - **Token Refresh**: [`auth::TokenRefresher`] exchanges the refresh token and
//!   persists the merged credential
//!
//! ### Resource Modules
//!
//! - [`profile`] - The current user's profile
//! - [`playlists`] - The user's playlists and their tracks, following `next`
//!   links until the listing is exhausted
//! - [`search`] - Track search
//! - [`playback`] - Current playback state and player commands, reported as a
//!   [`playback::PlaybackOutcome`]
//!
//! ## Token Recovery
//!
//! Access tokens are not checked for expiry up front. A request is sent with
//! the current token and only a `401 Unauthorized` answer triggers a refresh:
//!
//! 1. The rejected response body is drained and discarded
//! 2. The refresh token is exchanged at the token endpoint
//! 3. The merged credential is written to disk before it is used
//! 4. The original request is sent again, once
//!
//! Refreshes are serialized process-wide. A client that waited behind another
//! refresh adopts the credential already stored instead of refreshing again.
//!
//! ## Error Handling
//!
//! The client raises [`crate::error::ClientError`] and leaves non-401 statuses
//! to the caller. Resource operations wrap it in [`crate::error::ApiError`]
//! and add the statuses they cannot use.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use spotterm::{config::Config, spotify::{SpotifyClient, playlists}};
//!
//! let config = Config::from_env()?;
//! let mut client = SpotifyClient::new(&config).await?;
//! let href = playlists::playlists_url(&config.api_url, None);
//! for playlist in playlists::fetch_all(&mut client, &href).await? {
//!     println!("{}", playlist.name);
//! }
//! ```

pub mod auth;
mod client;
pub mod playback;
pub mod playlists;
pub mod profile;
pub mod search;

pub use client::SpotifyClient;
