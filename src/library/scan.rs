use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{PlayerError, Result};

use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            debug!(?path, error = %e, "could not probe track length");
            None
        }
    }
}

/// List the audio files directly inside `dir`.
///
/// Subdirectories are never entered and never become tracks. Entries are
/// ordered by file name (case-insensitive) so the playlist is stable across
/// platforms.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>> {
    if !dir.is_dir() {
        return Err(PlayerError::MissingDirectory(dir.to_path_buf()));
    }

    let mut tracks: Vec<Track> = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| {
            a.file_name()
                .to_string_lossy()
                .to_lowercase()
                .cmp(&b.file_name().to_string_lossy().to_lowercase())
        });

    for entry in walker.into_iter() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if !settings.include_hidden && is_hidden(path) {
            continue;
        }
        if !is_audio_file(path, settings) {
            debug!(?path, "skipping non-audio file");
            continue;
        }

        tracks.push(Track::from_path(path, probe_duration(path)));
    }

    debug!(count = tracks.len(), ?dir, "library scan finished");
    Ok(tracks)
}
