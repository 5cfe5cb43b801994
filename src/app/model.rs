//! Application model types: `App` and `Action`.
//!
//! The `App` struct wraps the player controller together with the bits of UI
//! state the renderer needs (status line, help toggle).

use tracing::error;

use crate::audio::{PlaybackEngine, PlaybackState, PlayerController, Speed};

/// Something the user asked for, decoupled from the key that triggered it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Play,
    Pause,
    TogglePlayPause,
    Reset,
    Previous,
    Next,
    SpeedUp,
    SpeedDown,
    SelectSpeed(Speed),
    VolumeUp,
    VolumeDown,
    ToggleHelp,
    Quit,
}

/// The main application model.
pub struct App<E: PlaybackEngine> {
    pub player: PlayerController<E>,
    pub current_dir: String,
    /// Last error worth showing to the user, cleared by the next action.
    pub status: Option<String>,
    pub show_help: bool,
    pub volume_step: u8,
}

impl<E: PlaybackEngine> App<E> {
    pub fn new(player: PlayerController<E>, current_dir: String, volume_step: u8) -> Self {
        Self {
            player,
            current_dir,
            status: None,
            show_help: true,
            volume_step: volume_step.max(1),
        }
    }

    /// Apply `action`. Returns `true` when the app should quit.
    pub fn apply(&mut self, action: Action) -> bool {
        self.status = None;
        match action {
            Action::Play => self.player.play(),
            Action::Pause => self.player.pause(),
            Action::TogglePlayPause => {
                if self.player.state() == PlaybackState::Playing {
                    self.player.pause();
                } else {
                    self.player.play();
                }
            }
            Action::Reset => self.player.reset(),
            Action::Previous => {
                let res = self.player.previous();
                self.report(res);
            }
            Action::Next => {
                let res = self.player.next();
                self.report(res);
            }
            Action::SpeedUp => {
                let speed = self.player.speed().unwrap_or_default().faster();
                self.player.change_speed(Some(speed));
            }
            Action::SpeedDown => {
                let speed = self.player.speed().unwrap_or_default().slower();
                self.player.change_speed(Some(speed));
            }
            Action::SelectSpeed(speed) => self.player.change_speed(Some(speed)),
            Action::VolumeUp => {
                let v = self.player.volume().saturating_add(self.volume_step).min(100);
                self.player.volume_changed(v);
            }
            Action::VolumeDown => {
                let v = self.player.volume().saturating_sub(self.volume_step);
                self.player.volume_changed(v);
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => return true,
        }
        false
    }

    /// Drain progress samples; called once per event-loop iteration.
    pub fn tick(&mut self) {
        let res = self.player.poll_progress();
        if res.is_err() {
            self.report(res);
        }
    }

    fn report(&mut self, res: crate::error::Result<()>) {
        if let Err(e) = res {
            error!(error = %e, "playback error");
            self.status = Some(e.to_string());
        }
    }
}
