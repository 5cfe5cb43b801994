use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PlayerError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    /// Display name: the file name as it appears in the directory.
    pub name: String,
    /// Length probed from the file headers, when available.
    pub duration: Option<Duration>,
}

impl Track {
    pub fn from_path(path: &Path, duration: Option<Duration>) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "UNKNOWN".to_string());

        Self {
            path: path.to_path_buf(),
            name,
            duration,
        }
    }
}

/// An ordered, non-empty list of tracks.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist from scanned `tracks`. `source` names the directory the
    /// tracks came from and is only used for the error message.
    pub fn new(tracks: Vec<Track>, source: &Path) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlayerError::NoPlayableTracks(source.to_path_buf()));
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index after `index`, wrapping to the first track.
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 < self.tracks.len() {
            index + 1
        } else {
            0
        }
    }

    /// Index before `index`, wrapping to the last track.
    pub fn prev_index(&self, index: usize) -> usize {
        if index > 0 && index < self.tracks.len() {
            index - 1
        } else {
            self.tracks.len() - 1
        }
    }
}
