//! # Terminal Player
//!
//! Full-screen player built on `ratatui` and `crossterm`. The UI loop only
//! draws and reads keys; every network call runs on a spawned task created by
//! [`tasks::spawn`] and comes back as an [`app::Message`] over a channel.
//!
//! The player state is read again shortly after each playback command and
//! every few seconds, so changes made on other devices show up as well.

pub mod app;
pub mod event_handler;
mod tasks;
pub mod ui;
pub mod widgets;

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, time::Instant};

use crate::{Res, config::Config};
use app::{Action, App};

const PLAYBACK_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Runs the terminal player until the user quits.
///
/// The terminal is restored on every exit path, including errors.
pub async fn run(config: Config) -> Res<()> {
    let config = Arc::new(config);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new();

    for action in App::startup_actions() {
        tasks::spawn(action, Arc::clone(&config), tx.clone());
    }

    let mut terminal = ratatui::try_init()?;
    tracing::info!("terminal player started");

    let mut next_poll = Instant::now() + PLAYBACK_POLL_INTERVAL;
    let result: Res<()> = loop {
        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut app)) {
            break Err(e.into());
        }

        match event_handler::next_action(&mut app) {
            Ok(Some(action)) => tasks::spawn(action, Arc::clone(&config), tx.clone()),
            Ok(None) => {}
            Err(e) => break Err(e.into()),
        }

        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        if app.should_quit {
            break Ok(());
        }

        if Instant::now() >= next_poll {
            next_poll = Instant::now() + PLAYBACK_POLL_INTERVAL;
            // Polling with a rejected credential would only repeat the failure.
            if !app.login_required {
                tasks::spawn(Action::RefreshPlayback, Arc::clone(&config), tx.clone());
            }
        }
    };

    ratatui::restore();
    tracing::info!("terminal player stopped");
    result
}
