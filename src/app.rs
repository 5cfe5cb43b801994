//! Application module: the app model used by the TUI and runtime, and the
//! key bindings that drive it.

mod keys;
mod model;

pub use keys::action_for_key;
pub use model::*;
