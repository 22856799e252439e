//! Spotify Terminal Client Library
//!
//! This library provides a command-line and terminal UI client for the Spotify
//! Web API. At its center sits an authenticated API client that attaches the
//! stored bearer token to every request, refreshes the token when Spotify
//! answers `401 Unauthorized`, persists the refreshed token and retries the
//! original request exactly once.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local login callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loaded from environment variables and `.env` files
//! - `error` - Typed errors for credential storage, refresh and API calls
//! - `logging` - `tracing` subscriber setup for the CLI and the terminal UI
//! - `management` - On-disk stores for the credential and the user profile
//! - `server` - Local HTTP server receiving the OAuth callback
//! - `spotify` - Authenticated client and Spotify Web API operations
//! - `tui` - Interactive terminal UI
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotterm::{config, spotify};
//!
//! #[tokio::main]
//! async fn main() -> spotterm::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let mut client = spotify::SpotifyClient::new(&config).await?;
//!     let me = client.get(&format!("{}/me", config.api_url)).await?;
//!     println!("{}", me.status());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod server;
pub mod spotify;
pub mod tui;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for the application edges
/// (CLI commands, login flow, terminal UI) using a boxed dynamic error trait
/// object. The typed errors in [`error`] convert into it with `?`.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use spotterm::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Starting login...");
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Example
///
/// ```
/// success!("Login completed successfully");
/// success!("Loaded {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only used for failures that leave
/// nothing to do, such as a configuration that cannot be loaded.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// problems that end the current command without terminating the program.
///
/// # Example
///
/// ```
/// warning!("No active device found");
/// warning!("Playback failed with status {}", status);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
