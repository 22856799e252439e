//! # API Module
//!
//! HTTP handlers served by the local login server while `spotterm login`
//! runs.
//!
//! ## Endpoints
//!
//! - [`login`] - Redirects the browser to Spotify's authorization page. This
//!   is the URL to open by hand when the browser could not be launched.
//! - [`callback`] - Receives Spotify's redirect, checks the `state` value and
//!   exchanges the authorization code for a credential.
//! - [`health`] - Returns status and version information.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotterm::api::{callback, health, login};
//!
//! let app = Router::new()
//!     .route("/login", get(login))
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::server`] - Binds and serves these handlers
//! - [`crate::spotify::auth`] - Login flow and code exchange

mod callback;
mod health;

pub use callback::callback;
pub use callback::login;
pub use health::health;
