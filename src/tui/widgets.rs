use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::types::PlaybackInfo;

const HELP: &[(&str, &str)] = &[
    ("q / Ctrl-C", "quit"),
    ("?", "toggle this help"),
    ("/ or s", "search"),
    ("p", "focus playlists"),
    ("Tab", "next pane"),
    ("↑ ↓ / k j", "move selection"),
    ("Enter", "open playlist or play selection"),
    ("Space", "play / pause"),
    ("l / →", "next track"),
    ("h / ←", "previous track"),
    ("r", "reload playlists"),
    ("Esc", "leave search, close help"),
];

pub fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title.to_string())
}

/// Selectable list with the selection highlighted.
pub fn selectable_list<'a>(items: Vec<ListItem<'a>>, block: Block<'a>) -> List<'a> {
    List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

pub fn two_line_item(title: &str, subtitle: &str) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(title.to_string()),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

pub fn now_playing(info: &PlaybackInfo) -> Paragraph<'static> {
    let line = if info.track_name.is_empty() {
        Line::from(Span::styled(
            "Nothing playing",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let (symbol, color) = if info.is_playing {
            ("▶", Color::Green)
        } else {
            ("⏸", Color::Yellow)
        };
        Line::from(vec![
            Span::styled(
                format!("{} ", symbol),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                info.track_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::raw(info.artist_name.clone()),
        ])
    };

    Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Now Playing"))
}

pub fn help() -> Paragraph<'static> {
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", keys),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*what),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Keys"))
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let inner = centered(area, 60, 60);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 30);
        assert_eq!((inner.x, inner.y), (20, 10));
    }
}
