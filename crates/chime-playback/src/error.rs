//! Playback error taxonomy.

use crate::backend::TrackHandle;
use crate::library::SongId;

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("volume {0} is outside [0, 1]")]
    InvalidVolume(f32),
    #[error("the music library is empty")]
    EmptyLibrary,
    #[error("no older song in the history")]
    NoOlderSong,
    #[error("unknown song {0:?}")]
    UnknownSong(SongId),
    #[error("unknown track {0:?}")]
    UnknownTrack(TrackHandle),
    #[error("failed to load {path}: {reason}")]
    TrackLoad { path: String, reason: String },
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
