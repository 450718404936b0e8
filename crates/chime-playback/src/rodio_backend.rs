//! Audio output through rodio's default device.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use log::debug;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::backend::{AudioBackend, TrackHandle};
use crate::error::PlaybackError;

/// [`AudioBackend`] over the system's default output device.
///
/// Each loaded track gets its own paused [`Sink`] connected to the shared
/// mixer. All calls, including completion polling, happen on the frame
/// loop's thread; rodio's own output thread only ever pulls samples.
pub struct RodioBackend {
    _stream: OutputStream,
    mixer: Mixer,
    sinks: HashMap<u64, Sink>,
    next_handle: u64,
    current: Option<u64>,
    volume: f32,
}

impl RodioBackend {
    pub fn new() -> Result<Self, PlaybackError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| PlaybackError::DeviceUnavailable(err.to_string()))?;
        let mixer = stream.mixer().clone();
        Ok(Self {
            _stream: stream,
            mixer,
            sinks: HashMap::new(),
            next_handle: 0,
            current: None,
            volume: 1.0,
        })
    }

    fn current_sink(&self) -> Option<&Sink> {
        self.current.and_then(|id| self.sinks.get(&id))
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &str) -> Result<TrackHandle, PlaybackError> {
        let file = File::open(path).map_err(|err| PlaybackError::TrackLoad {
            path: path.to_string(),
            reason: err.to_string(),
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|err| PlaybackError::TrackLoad {
            path: path.to_string(),
            reason: err.to_string(),
        })?;

        let sink = Sink::connect_new(&self.mixer);
        sink.append(source);
        sink.set_volume(self.volume);
        sink.pause();

        let handle = TrackHandle(self.next_handle);
        self.next_handle += 1;
        self.sinks.insert(handle.0, sink);
        debug!("loaded {path} as {handle:?}");
        Ok(handle)
    }

    fn play(&mut self, handle: TrackHandle) -> Result<(), PlaybackError> {
        let sink = self
            .sinks
            .get(&handle.0)
            .ok_or(PlaybackError::UnknownTrack(handle))?;
        sink.set_volume(self.volume);
        sink.play();
        self.current = Some(handle.0);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.current_sink() {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = self.current_sink() {
            sink.play();
        }
    }

    fn halt(&mut self) {
        if let Some(id) = self.current.take() {
            if let Some(sink) = self.sinks.get(&id) {
                sink.stop();
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.current_sink() {
            sink.set_volume(volume);
        }
    }

    fn free(&mut self, handle: TrackHandle) {
        if self.current == Some(handle.0) {
            self.current = None;
        }
        self.sinks.remove(&handle.0);
    }

    fn poll_finished(&mut self) -> bool {
        // A paused sink never drains, so empty means it ran to the end.
        match self.current_sink() {
            Some(sink) if sink.empty() => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
