//! Configuration management for the Spotify terminal client.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files into an explicit [`Config`] value. The value is
//! built once at startup and passed to every component that needs it, most
//! notably the refresh protocol which needs the application's client id and
//! secret.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (everything except the client id and secret)

use std::{
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use thiserror::Error;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-library-read \
playlist-read-private user-read-playback-state user-modify-playback-state";

const APP_DIR: &str = "spotterm";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// OAuth application settings used by the login flow and the refresh protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
}

/// Runtime configuration of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub oauth: OAuthConfig,
    /// Base URL of the Web API, without trailing slash.
    pub api_url: String,
    /// Bind address of the local callback server.
    pub server_address: SocketAddr,
    /// Directory holding the `.env` file, the credential cache and logs.
    pub data_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first so that values from `.env` files are visible.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the client id or secret is missing, or if
    /// the server address cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let server_address = or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "SERVER_ADDRESS",
                reason: e.to_string(),
            })?;

        let data_dir = get("SPOTTERM_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Ok(Config {
            oauth: OAuthConfig {
                client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
                client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
                redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
                scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
                auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
                token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            },
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            server_address,
            data_dir,
        })
    }

    /// Path of the persisted credential (`<data_dir>/cache/token.json`).
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join("cache").join("token.json")
    }

    /// Path of the cached user profile (`<data_dir>/cache/profile.json`).
    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join("cache").join("profile.json")
    }

    /// Path of the log file written while the terminal UI is running.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("spotterm.log")
    }

    /// Builds an absolute Web API URL from a path such as `/me/player`.
    pub fn api(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

/// Returns the platform-specific data directory of the application.
///
/// - Linux: `~/.local/share/spotterm`
/// - macOS: `~/Library/Application Support/spotterm`
/// - Windows: `%LOCALAPPDATA%/spotterm`
pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Loads environment variables from `.env` files.
///
/// Creates the data directory if it doesn't exist, then loads a `.env` file
/// from the current working directory followed by the one in the data
/// directory. Variables that are already set are never overwritten, so the
/// process environment wins over both files. Missing files are not an error.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or if an
/// existing `.env` file cannot be parsed.
///
/// # Example
///
/// ```
/// use spotterm::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let dir = env::var("SPOTTERM_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_data_dir());
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    load_env_file(Path::new(".env"))?;
    load_env_file(&dir.join(".env"))
}

fn load_env_file(path: &Path) -> Result<(), String> {
    match dotenv::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}
