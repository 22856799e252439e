use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{Action, App, Focus};

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Waits briefly for a key press and turns it into an [`Action`].
pub fn next_action(app: &mut App) -> io::Result<Option<Action>> {
    if event::poll(POLL_TIMEOUT)? {
        if let Event::Key(key_event) = event::read()? {
            return Ok(handle_key_event(app, key_event));
        }
    }
    Ok(None)
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind != event::KeyEventKind::Press {
        return None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    match app.focus {
        Focus::Search => handle_search_mode(app, key),
        _ => handle_normal_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = !app.show_help,
        KeyCode::Esc => app.show_help = false,
        KeyCode::Char('/') | KeyCode::Char('s') => app.focus(Focus::Search),
        KeyCode::Char('p') => app.focus(Focus::Playlists),
        KeyCode::Tab => app.focus_next_list(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter => return app.enter(),
        KeyCode::Char(' ') => return Some(app.toggle_playback()),
        KeyCode::Char('l') | KeyCode::Right => return Some(Action::Next),
        KeyCode::Char('h') | KeyCode::Left => return Some(Action::Previous),
        KeyCode::Char('r') => return Some(Action::LoadPlaylists),
        _ => {}
    }
    None
}

fn handle_search_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => return app.enter(),
        KeyCode::Esc => app.leave_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => app.search_input.push(c),
        _ => {}
    }
    None
}
