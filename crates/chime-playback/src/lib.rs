//! Music library scanning and playback/history state for Chime.
//!
//! [`Library`] holds the immutable result of the startup directory scan.
//! [`Player`] owns the playback state the widgets poll every frame
//! (volume, pause flag, the currently playing song, and the
//! previously-played history with its replay cursor) and drives an
//! [`AudioBackend`]. The [`RodioBackend`] plays through the default output
//! device; the [`SilentBackend`] records calls for headless tests.

mod backend;
mod error;
mod library;
mod player;
mod rodio_backend;
mod silent;

pub use backend::*;
pub use error::*;
pub use library::*;
pub use player::*;
pub use rodio_backend::*;
pub use silent::*;

pub mod prelude {
    pub use crate::backend::{AudioBackend, TrackHandle};
    pub use crate::error::PlaybackError;
    pub use crate::library::{Library, SongEntry, SongId};
    pub use crate::player::Player;
}
