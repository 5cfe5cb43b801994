//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::audio::{PlaybackEngine, PlaybackState, Speed};
use crate::config::UiSettings;

const CONTROLS: [(&str, &str); 9] = [
    ("p/enter", "play"),
    ("s", "pause"),
    ("space", "play/pause"),
    ("r", "reset"),
    ("h/l", "prev/next"),
    ("[/]", "speed -/+"),
    ("1-8", "pick speed"),
    ("-/+", "volume"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn state_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw<E: PlaybackEngine>(frame: &mut Frame, app: &App<E>, ui_settings: &UiSettings) {
    let player = &app.player;
    let footer_height = if app.show_help { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(footer_height),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadence ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Track label + state
    let status = {
        let mut parts: Vec<String> = vec![
            format!(" {}", state_text(player.state())),
            format!("Song: {}", player.track_name()),
        ];
        if !player.has_session() {
            parts.push("(unplayable)".to_string());
        }
        if let Some((elapsed, total)) = player.position() {
            match total {
                Some(t) => parts.push(format!("{} / {}", format_mmss(elapsed), format_mmss(t))),
                None => parts.push(format_mmss(elapsed)),
            }
        }
        parts.push(format!("Dir: {}", app.current_dir));
        if let Some(msg) = &app.status {
            parts.push(format!("ERROR: {}", msg));
        }
        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(Block::bordered().title(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Playlist
    {
        let items: Vec<ListItem> = player
            .playlist()
            .tracks()
            .iter()
            .map(|t| ListItem::new(t.name.as_str()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(player.current_index()));
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let progress_title = if player.timer_running() {
        " progress • live "
    } else {
        " progress "
    };
    let progress = Gauge::default()
        .block(Block::bordered().title(progress_title))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(player.progress().clamp(0.0, 1.0))
        .label(format!("{:.0}%", player.progress() * 100.0));
    frame.render_widget(progress, chunks[3]);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[4]);

    let speeds: Vec<Line> = Speed::ALL.iter().map(|s| Line::from(s.to_string())).collect();
    // No highlight until the user picks a speed.
    let tabs = Tabs::new(speeds)
        .block(Block::bordered().title(" speed "))
        .highlight_style(Style::default().bold().reversed())
        .select(player.speed().map(Speed::position));
    frame.render_widget(tabs, row[0]);

    let volume = Gauge::default()
        .block(Block::bordered().title(" volume "))
        .ratio(player.volume() as f64 / 100.0)
        .label(format!("{}%", player.volume()));
    frame.render_widget(volume, row[1]);

    if app.show_help {
        let footer = Paragraph::new(controls_text())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" controls (? hides) ")
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, chunks[5]);
    }
}
