//! `rodio` implementation of the playback engine.
//!
//! One `OutputStream` lives for the whole process; every session is a fresh
//! `Sink` on its mixer holding a single decoded file.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::{PlayerError, Result};
use crate::library::Track;

use super::types::{PlaybackEngine, PlaybackSession};

pub struct RodioEngine {
    stream: OutputStream,
}

impl RodioEngine {
    /// Open the default audio output device.
    pub fn open_default() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::OutputStream(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the terminal UI.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl PlaybackEngine for RodioEngine {
    type Session = RodioSession;

    fn open(&self, track: &Track) -> Result<RodioSession> {
        let file = File::open(&track.path).map_err(|source| PlayerError::Open {
            path: track.path.clone(),
            source,
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::Decode {
            path: track.path.clone(),
            reason: e.to_string(),
        })?;
        let duration = track.duration.or_else(|| source.total_duration());

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();

        Ok(RodioSession { sink, duration })
    }
}

pub struct RodioSession {
    sink: Sink,
    duration: Option<Duration>,
}

impl PlaybackSession for RodioSession {
    fn play(&self) {
        self.sink.play();
    }

    fn pause(&self) {
        self.sink.pause();
    }

    fn stop(&self) {
        self.sink.stop();
    }

    fn seek(&self, position: Duration) -> Result<()> {
        self.sink
            .try_seek(position)
            .map_err(|e| PlayerError::Seek(e.to_string()))
    }

    fn set_rate(&self, rate: f32) {
        self.sink.set_speed(rate);
    }

    fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn finished(&self) -> bool {
        self.sink.empty()
    }
}
