use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::library::{Playlist, Track};

use super::progress::ProgressTimer;
use super::speed::Speed;
use super::types::{PlaybackEngine, PlaybackSession, PlaybackState, ProgressEvent};

/// Start-up options for a [`PlayerController`].
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    /// Initial volume in percent.
    pub volume: u8,
    /// Initial speed selection; `None` plays at normal speed.
    pub speed: Option<Speed>,
    /// How often the progress timer samples the session.
    pub progress_period: Duration,
    /// Start the next track when the current one ends.
    pub auto_advance: bool,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            volume: 100,
            speed: None,
            progress_period: Duration::from_millis(1000),
            auto_advance: false,
        }
    }
}

/// Owns the playlist, the current track and its playback session, and the
/// progress timer. All methods are called from the UI thread.
pub struct PlayerController<E: PlaybackEngine> {
    engine: E,
    playlist: Playlist,
    index: usize,
    session: Option<Arc<E::Session>>,
    generation: u64,
    state: PlaybackState,
    speed: Option<Speed>,
    volume: u8,
    progress: f64,
    timer: Option<ProgressTimer>,
    progress_period: Duration,
    auto_advance: bool,
    events_tx: Sender<ProgressEvent>,
    events_rx: Receiver<ProgressEvent>,
}

impl<E: PlaybackEngine> PlayerController<E> {
    /// Open the first track of `playlist`. Fails if that track cannot be opened.
    pub fn new(engine: E, playlist: Playlist, options: PlayerOptions) -> Result<Self> {
        let (events_tx, events_rx) = mpsc::channel::<ProgressEvent>();
        let mut controller = Self {
            engine,
            playlist,
            index: 0,
            session: None,
            generation: 0,
            state: PlaybackState::Stopped,
            speed: options.speed,
            volume: options.volume.min(100),
            progress: 0.0,
            timer: None,
            progress_period: options.progress_period,
            auto_advance: options.auto_advance,
            events_tx,
            events_rx,
        };
        controller.load_current()?;
        Ok(controller)
    }

    /// Start or resume playback with the current speed and volume.
    pub fn play(&mut self) {
        self.reopen_if_drained();
        let Some(session) = self.session.clone() else {
            warn!(track = %self.track_name(), "nothing to play, track failed to open");
            return;
        };

        self.apply_speed();
        session.set_volume(self.volume as f32 / 100.0);
        self.begin_progress_timer();
        session.play();
        self.state = PlaybackState::Playing;
        debug!(track = %self.track_name(), "play");
    }

    /// Pause playback, keeping the position.
    pub fn pause(&mut self) {
        self.cancel_progress_timer();
        if let Some(session) = &self.session {
            session.pause();
        }
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        debug!(track = %self.track_name(), "pause");
    }

    /// Stop playback and rewind to the start of the track.
    pub fn reset(&mut self) {
        self.cancel_progress_timer();
        self.reopen_if_drained();
        self.progress = 0.0;
        if let Some(session) = &self.session {
            session.pause();
            if let Err(e) = session.seek(Duration::ZERO) {
                warn!(track = %self.track_name(), error = %e, "could not rewind track");
            }
        }
        self.state = PlaybackState::Stopped;
        debug!(track = %self.track_name(), "reset");
    }

    /// Switch to the previous track (wrapping to the last one) and play it.
    pub fn previous(&mut self) -> Result<()> {
        let index = self.playlist.prev_index(self.index);
        self.switch_to(index)
    }

    /// Switch to the next track (wrapping to the first one) and play it.
    pub fn next(&mut self) -> Result<()> {
        let index = self.playlist.next_index(self.index);
        self.switch_to(index)
    }

    /// Select a playback speed. `None` means no selection, i.e. normal speed.
    ///
    /// Only the session rate is touched, so this is safe in any state.
    pub fn change_speed(&mut self, selection: Option<Speed>) {
        self.speed = selection;
        self.apply_speed();
    }

    /// Set the volume from a 0-100 control value.
    pub fn volume_changed(&mut self, value: u8) {
        self.volume = value.min(100);
        if let Some(session) = &self.session {
            session.set_volume(self.volume as f32 / 100.0);
        }
    }

    /// Start a fresh progress timer for the current session, replacing any
    /// running one.
    pub fn begin_progress_timer(&mut self) {
        self.cancel_progress_timer();
        if let Some(session) = &self.session {
            self.timer = Some(ProgressTimer::start(
                session.clone(),
                self.progress_period,
                self.generation,
                self.events_tx.clone(),
            ));
        }
    }

    /// Stop the progress timer if one is active.
    ///
    /// Samples it posted but that were not polled yet are discarded, so a
    /// late tick cannot undo a pause or reset.
    pub fn cancel_progress_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        while self.events_rx.try_recv().is_ok() {}
    }

    /// Apply progress samples posted by the timer since the last call.
    ///
    /// Samples from an earlier session are dropped. Returns an error only when
    /// auto-advance tried to open a track and failed.
    pub fn poll_progress(&mut self) -> Result<()> {
        let mut ended = false;
        while let Ok(event) = self.events_rx.try_recv() {
            if event.generation != self.generation {
                continue;
            }
            self.progress = event.ratio;
            if event.finished {
                ended = true;
            }
        }

        if ended {
            self.cancel_progress_timer();
            self.state = PlaybackState::Stopped;
            info!(track = %self.track_name(), "track finished");
            if self.auto_advance {
                return self.next();
            }
        }
        Ok(())
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.index)
    }

    /// Name shown in the track label.
    pub fn track_name(&self) -> &str {
        self.current_track().map(|t| t.name.as_str()).unwrap_or("")
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Last displayed progress fraction.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn speed(&self) -> Option<Speed> {
        self.speed
    }

    /// Effective playback rate.
    pub fn rate(&self) -> f32 {
        self.speed.map_or(1.0, Speed::rate)
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(ProgressTimer::is_running)
    }

    /// Whether a session is open for the current track.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Elapsed time and length of the current track, for the status line.
    pub fn position(&self) -> Option<(Duration, Option<Duration>)> {
        self.session.as_ref().map(|s| (s.position(), s.duration()))
    }

    fn apply_speed(&self) {
        if let Some(session) = &self.session {
            session.set_rate(self.rate());
        }
    }

    /// A session that played to its end has no source left to seek in, so
    /// open the same track again. A failure leaves no session and is logged
    /// by `load_current`.
    fn reopen_if_drained(&mut self) {
        if !self.session.as_ref().is_some_and(|s| s.finished()) {
            return;
        }
        debug!(track = %self.track_name(), "track played out, reopening");
        let _ = self.load_current();
    }

    fn switch_to(&mut self, index: usize) -> Result<()> {
        self.index = index;
        self.load_current()?;
        self.play();
        Ok(())
    }

    /// Tear down the old session and open one for `self.index`.
    ///
    /// The old session is stopped and released before the new one is opened,
    /// so two sessions are never live at once.
    fn load_current(&mut self) -> Result<()> {
        self.cancel_progress_timer();
        if let Some(old) = self.session.take() {
            old.stop();
        }
        self.generation += 1;
        self.progress = 0.0;
        self.state = PlaybackState::Stopped;

        let Some(track) = self.playlist.get(self.index) else {
            return Ok(());
        };
        let session = match self.engine.open(track) {
            Ok(s) => s,
            Err(e) => {
                warn!(track = %track.name, error = %e, "failed to open track");
                return Err(e);
            }
        };
        info!(track = %track.name, index = self.index, "loaded track");

        session.set_rate(self.rate());
        session.set_volume(self.volume as f32 / 100.0);
        self.session = Some(Arc::new(session));
        Ok(())
    }
}

impl<E: PlaybackEngine> Drop for PlayerController<E> {
    fn drop(&mut self) {
        self.cancel_progress_timer();
        if let Some(session) = self.session.take() {
            session.stop();
        }
    }
}
