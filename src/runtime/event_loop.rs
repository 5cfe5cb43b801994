use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, action_for_key};
use crate::audio::PlaybackEngine;
use crate::config;
use crate::ui;

/// Main terminal event loop: drains progress samples, draws, and maps key
/// presses to player actions. Returns `Ok(())` when the user quits.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<E>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Progress samples arrive from the timer thread; apply them here so
        // only this thread ever mutates what the UI draws.
        app.tick();

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = action_for_key(key) {
                    debug!(?action, "key action");
                    if app.apply(action) {
                        return Ok(());
                    }
                }
            }
        }
    }
}
