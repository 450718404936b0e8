//! A call-recording audio backend for headless tests.

use crate::backend::{AudioBackend, TrackHandle};
use crate::error::PlaybackError;

/// Backend that produces no sound. Loads always succeed unless a path is
/// explicitly poisoned, and track completion is simulated with
/// [`finish_current`](Self::finish_current).
#[derive(Default)]
pub struct SilentBackend {
    next_handle: u64,
    /// Paths whose load should fail.
    pub failing_paths: Vec<String>,
    /// Every path loaded, in order.
    pub loaded: Vec<String>,
    /// Every handle played, in order.
    pub played: Vec<TrackHandle>,
    /// Every handle freed, in order.
    pub freed: Vec<TrackHandle>,
    pub volume: f32,
    pub halted: u32,
    pub paused: bool,
    finished: bool,
}

impl SilentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the current track as naturally finished; the next
    /// [`poll_finished`](AudioBackend::poll_finished) reports it once.
    pub fn finish_current(&mut self) {
        self.finished = true;
    }
}

impl AudioBackend for SilentBackend {
    fn load(&mut self, path: &str) -> Result<TrackHandle, PlaybackError> {
        if self.failing_paths.iter().any(|p| p == path) {
            return Err(PlaybackError::TrackLoad {
                path: path.to_string(),
                reason: "poisoned by test".to_string(),
            });
        }
        self.loaded.push(path.to_string());
        let handle = TrackHandle(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn play(&mut self, handle: TrackHandle) -> Result<(), PlaybackError> {
        self.played.push(handle);
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn halt(&mut self) {
        self.halted += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn free(&mut self, handle: TrackHandle) {
        self.freed.push(handle);
    }

    fn poll_finished(&mut self) -> bool {
        std::mem::take(&mut self.finished)
    }
}
