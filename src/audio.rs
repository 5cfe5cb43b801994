//! Playback: the player controller, the engine seam it drives, the `rodio`
//! engine, and the progress timer.

mod player;
mod progress;
mod sink;
mod speed;
mod types;

pub use player::{PlayerController, PlayerOptions};
pub use sink::RodioEngine;
pub use speed::Speed;
pub use types::{PlaybackEngine, PlaybackState};

#[cfg(test)]
pub(crate) mod testing;
