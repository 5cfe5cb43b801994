use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use crate::app::App;
use crate::audio::{PlayerController, RodioEngine};
use crate::library::{Playlist, scan};
use crate::logging;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    match logging::init(&settings.log) {
        Ok(path) => info!(log = %path.display(), "cadence starting"),
        Err(e) => eprintln!("cadence: logging disabled: {e}"),
    }
    if let Some(w) = config_warning {
        warn!("{w}");
    }

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.library.dir.clone());

    // Everything that can fail for a missing or empty library happens before
    // the terminal switches to raw mode, so the message stays readable.
    let tracks = scan(&dir, &settings.library)?;
    let playlist = Playlist::new(tracks, &dir)?;
    info!(tracks = playlist.len(), dir = %dir.display(), "library loaded");

    let engine = RodioEngine::open_default()?;
    let player = PlayerController::new(engine, playlist, startup::player_options(&settings))?;
    let mut app = App::new(
        player,
        dir.display().to_string(),
        settings.controls.volume_step,
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        error!(error = %e, "event loop failed");
    }
    info!("cadence exiting");
    run_result
}
