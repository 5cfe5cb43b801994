//! Music library: the directory scanner and the playlist it produces.
//!
//! `scan` lists a single directory (non-recursively) and keeps only files with
//! a recognised audio extension. `Playlist` wraps the result and refuses to be
//! empty, so the player always has a track to open.

mod model;
mod scan;

pub use model::*;
pub use scan::*;
