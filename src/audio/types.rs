//! Audio-related small types.
//!
//! This module defines the playback state machine states, the engine seam the
//! controller drives, and the message the progress timer posts to the UI.

use std::time::Duration;

use crate::error::Result;
use crate::library::Track;

/// The playback state of the current session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// A live binding between one track and the audio output.
///
/// All methods take `&self`: a session is shared between the controller and
/// the progress timer thread through an `Arc`.
pub trait PlaybackSession: Send + Sync {
    fn play(&self);
    fn pause(&self);
    /// Stop for good; the session cannot be resumed afterwards.
    fn stop(&self);
    fn seek(&self, position: Duration) -> Result<()>;
    fn set_rate(&self, rate: f32);
    /// Volume in `0.0..=1.0`.
    fn set_volume(&self, volume: f32);
    fn position(&self) -> Duration;
    /// Total length, if known.
    fn duration(&self) -> Option<Duration>;
    /// Whether the whole source has been played.
    fn finished(&self) -> bool;
}

/// Opens sessions for tracks.
pub trait PlaybackEngine {
    type Session: PlaybackSession + 'static;

    /// Open a paused session positioned at the start of `track`.
    fn open(&self, track: &Track) -> Result<Self::Session>;
}

/// A progress sample posted from the timer thread to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    /// Session generation the sample was taken from.
    pub generation: u64,
    /// Elapsed fraction of the track, in `0.0..=1.0`.
    pub ratio: f64,
    /// The track reached its end; the timer has stopped itself.
    pub finished: bool,
}
