//! The player's concrete controls.

mod play_pause;
mod skip;
mod song_list;
mod volume;

pub use play_pause::*;
pub use skip::*;
pub use song_list::*;
pub use volume::*;
