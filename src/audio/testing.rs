//! In-memory playback engine for controller and UI tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::types::{PlaybackEngine, PlaybackSession};
use crate::error::{PlayerError, Result};
use crate::library::{Playlist, Track};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SessionLog {
    pub(crate) path: PathBuf,
    pub(crate) playing: bool,
    pub(crate) stopped: bool,
    pub(crate) rate: f32,
    pub(crate) volume: f32,
    pub(crate) position: Duration,
    pub(crate) seeks: Vec<Duration>,
    /// Set by a test to simulate a source that has played out.
    pub(crate) drained: bool,
}

pub(crate) struct FakeSession {
    log: Arc<Mutex<SessionLog>>,
    duration: Option<Duration>,
    live: Arc<AtomicUsize>,
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PlaybackSession for FakeSession {
    fn play(&self) {
        self.log.lock().unwrap().playing = true;
    }
    fn pause(&self) {
        self.log.lock().unwrap().playing = false;
    }
    fn stop(&self) {
        let mut log = self.log.lock().unwrap();
        log.playing = false;
        log.stopped = true;
    }
    fn seek(&self, position: Duration) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.position = position;
        log.seeks.push(position);
        Ok(())
    }
    fn set_rate(&self, rate: f32) {
        self.log.lock().unwrap().rate = rate;
    }
    fn set_volume(&self, volume: f32) {
        self.log.lock().unwrap().volume = volume;
    }
    fn position(&self) -> Duration {
        self.log.lock().unwrap().position
    }
    fn duration(&self) -> Option<Duration> {
        self.duration
    }
    fn finished(&self) -> bool {
        self.log.lock().unwrap().drained
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeEngine {
    pub(crate) sessions: Arc<Mutex<Vec<Arc<Mutex<SessionLog>>>>>,
    pub(crate) live: Arc<AtomicUsize>,
    pub(crate) max_live: Arc<AtomicUsize>,
    pub(crate) broken: Arc<Mutex<HashSet<PathBuf>>>,
    pub(crate) duration: Option<Duration>,
}

impl FakeEngine {
    pub(crate) fn with_duration(duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub(crate) fn last(&self) -> SessionLog {
        self.sessions
            .lock()
            .unwrap()
            .last()
            .unwrap()
            .lock()
            .unwrap()
            .clone()
    }

    pub(crate) fn last_handle(&self) -> Arc<Mutex<SessionLog>> {
        self.sessions.lock().unwrap().last().unwrap().clone()
    }

    pub(crate) fn session(&self, i: usize) -> SessionLog {
        self.sessions.lock().unwrap()[i].lock().unwrap().clone()
    }

    pub(crate) fn opened(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub(crate) fn break_track(&self, name: &str) {
        self.broken.lock().unwrap().insert(music_path(name));
    }
}

impl PlaybackEngine for FakeEngine {
    type Session = FakeSession;

    fn open(&self, track: &Track) -> Result<FakeSession> {
        if self.broken.lock().unwrap().contains(&track.path) {
            return Err(PlayerError::Decode {
                path: track.path.clone(),
                reason: "broken".to_string(),
            });
        }

        let log = Arc::new(Mutex::new(SessionLog {
            path: track.path.clone(),
            playing: false,
            stopped: false,
            rate: 1.0,
            volume: 1.0,
            position: Duration::ZERO,
            seeks: Vec::new(),
            drained: false,
        }));
        self.sessions.lock().unwrap().push(log.clone());

        let now = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(now, Ordering::SeqCst);

        Ok(FakeSession {
            log,
            duration: self.duration,
            live: self.live.clone(),
        })
    }
}

pub(crate) fn music_path(name: &str) -> PathBuf {
    Path::new("/tmp/music").join(name)
}

pub(crate) fn playlist(names: &[&str]) -> Playlist {
    let tracks = names
        .iter()
        .map(|n| Track::from_path(&music_path(n), None))
        .collect();
    Playlist::new(tracks, Path::new("/tmp/music")).unwrap()
}
