//! `tracing` subscriber setup.
//!
//! The CLI logs to stderr so diagnostics never mix with command output. The
//! terminal UI owns the screen, so it logs to a file in the data directory
//! instead.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::EnvFilter;

/// Debug output for this crate only. Dependencies stay at `warn`.
const VERBOSE_FILTER: &str = "warn,spotterm=debug";

fn env_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { VERBOSE_FILTER } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Installs a subscriber appending to `path`, creating parent directories.
pub fn init_file(path: &Path, verbose: bool) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_filter_is_scoped_to_this_crate() {
        let filter = EnvFilter::new(VERBOSE_FILTER).to_string();
        assert!(filter.contains("spotterm=debug"));
        assert!(!filter.split(',').any(|directive| directive == "debug"));
    }
}
