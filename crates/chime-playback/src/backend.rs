//! The audio collaborator contract.

use crate::error::PlaybackError;

/// Stable handle to one decoded track held by the backend.
///
/// Decoded resources accumulate while tracks play and are freed exactly
/// once, when natural completion is observed through
/// [`AudioBackend::poll_finished`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackHandle(pub u64);

/// Audio decode and playback control, as provided by the platform.
///
/// Completion is exposed as a poll rather than a cross-thread callback so
/// the frame loop observes it at a point serialized with every other
/// mutation of playback state.
pub trait AudioBackend {
    /// Decodes a file into a paused track.
    fn load(&mut self, path: &str) -> Result<TrackHandle, PlaybackError>;

    /// Starts (or restarts) playback of a loaded track.
    fn play(&mut self, handle: TrackHandle) -> Result<(), PlaybackError>;

    /// Pauses the playing track.
    fn pause(&mut self);

    /// Resumes the paused track.
    fn resume(&mut self);

    /// Stops the playing track.
    fn halt(&mut self);

    /// Sets the output volume from a normalized [0, 1] fraction.
    fn set_volume(&mut self, volume: f32);

    /// Frees one decoded track. Unknown handles are ignored.
    fn free(&mut self, handle: TrackHandle);

    /// True exactly once per track that ran to natural completion.
    fn poll_finished(&mut self) -> bool;
}
