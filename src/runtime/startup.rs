use std::time::Duration;

use crate::audio::{PlayerOptions, Speed};
use crate::config;

/// Translate loaded settings into controller start-up options.
pub fn player_options(settings: &config::Settings) -> PlayerOptions {
    let speed = settings.audio.speed.as_deref().map(Speed::from_label);

    PlayerOptions {
        volume: settings.audio.volume.min(100),
        speed,
        progress_period: Duration::from_millis(settings.ui.progress_refresh_ms.max(1)),
        auto_advance: settings.playback.auto_advance,
    }
}
