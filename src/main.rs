use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotterm::{
    cli::{self, PlayerCommand},
    config::{self, Config},
    error, logging, tui,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Show debug logs (overridden by RUST_LOG)
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify
    Login,

    /// Show the logged-in user's profile
    Me,

    /// Browse your playlists and play one
    Playlist,

    /// Search for tracks
    Search(SearchOptions),

    /// Play a track, playlist or album URI
    Play(PlayOptions),

    /// Pause playback
    Pause,

    /// Resume playback
    Resume,

    /// Skip to the next track
    Next,

    /// Go back to the previous track
    Prev,

    /// Open the terminal player
    Tui,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Words to search for
    #[clap(required = true, num_args = 1..)]
    query: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Spotify URI, e.g. spotify:track:4uLU6hMCjMI75M1A2tKUQC
    uri: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    if matches!(cli.command, Command::Tui) {
        if let Err(e) = logging::init_file(&config.log_path(), cli.verbose) {
            error!("Cannot open log file {}. Err: {}", config.log_path().display(), e);
        }
        if let Err(e) = tui::run(config).await {
            error!("Terminal player failed. Err: {}", e);
        }
        return;
    }

    logging::init_stderr(cli.verbose);

    match cli.command {
        Command::Login => cli::login(&config).await,
        Command::Me => cli::me(&config).await,
        Command::Playlist => cli::playlist(&config).await,
        Command::Search(opt) => cli::search(&config, &opt.query).await,
        Command::Play(opt) => cli::play(&config, &opt.uri).await,
        Command::Pause => cli::control(&config, PlayerCommand::Pause).await,
        Command::Resume => cli::control(&config, PlayerCommand::Resume).await,
        Command::Next => cli::control(&config, PlayerCommand::Next).await,
        Command::Prev => cli::control(&config, PlayerCommand::Previous).await,
        Command::Tui | Command::Completions(_) => {}
    }
}
