//! Error types shared by the library scanner and the player.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The music directory does not exist or is not a directory.
    #[error("music directory {0:?} does not exist or is not a directory")]
    MissingDirectory(PathBuf),

    /// The music directory holds nothing we can play.
    #[error("no playable tracks found in {0:?}")]
    NoPlayableTracks(PathBuf),

    /// No audio output device could be opened.
    #[error("failed to open audio output: {0}")]
    OutputStream(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("seek failed: {0}")]
    Seek(String),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
