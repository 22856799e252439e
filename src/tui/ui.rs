use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, ListItem, Paragraph};

use super::app::{App, Focus};
use super::widgets;
use crate::utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    frame.render_widget(widgets::now_playing(&app.playback), chunks[0]);
    render_lists(frame, app, chunks[1]);
    render_search(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);

    if app.show_help {
        let area = widgets::centered(size, 50, 70);
        frame.render_widget(Clear, area);
        frame.render_widget(widgets::help(), area);
    }
}

fn render_lists(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    let playlists: Vec<ListItem> = app
        .playlists
        .iter()
        .map(|p| {
            let count = p.tracks.total.map(|t| format!("{} tracks", t)).unwrap_or_default();
            widgets::two_line_item(&p.name, &count)
        })
        .collect();
    let block = widgets::pane_block("Playlists", app.focus == Focus::Playlists);
    frame.render_stateful_widget(
        widgets::selectable_list(playlists, block),
        columns[0],
        &mut app.playlist_state,
    );

    let title = match &app.open_playlist {
        Some(p) => format!("Tracks - {}", p.name),
        None => "Tracks".to_string(),
    };
    let tracks: Vec<ListItem> = app
        .tracks
        .iter()
        .map(|t| widgets::two_line_item(&t.name, &utils::join_artist_names(&t.artists)))
        .collect();
    let block = widgets::pane_block(&title, app.focus == Focus::Tracks);
    frame.render_stateful_widget(
        widgets::selectable_list(tracks, block),
        columns[1],
        &mut app.track_state,
    );

    let results: Vec<ListItem> = app
        .results
        .iter()
        .map(|t| widgets::two_line_item(&t.name, &utils::join_artist_names(&t.artists)))
        .collect();
    let block = widgets::pane_block("Search results", app.focus == Focus::Results);
    frame.render_stateful_widget(
        widgets::selectable_list(results, block),
        columns[2],
        &mut app.result_state,
    );
}

fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let text = if focused {
        format!("{}█", app.search_input)
    } else {
        app.search_input.clone()
    };
    let input = Paragraph::new(text).block(widgets::pane_block("Search", focused));
    frame.render_widget(input, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let color = if app.status_is_error {
        Color::Red
    } else {
        Color::Gray
    };

    let mut spans = vec![Span::styled(app.status.clone(), Style::default().fg(color))];
    if let Some(at) = app.last_update {
        spans.push(Span::styled(
            format!("  ·  updated {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        "  ·  ? for help",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
