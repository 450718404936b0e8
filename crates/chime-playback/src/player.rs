//! Playback state and previously-played history.

use std::collections::VecDeque;

use log::{debug, info};
use rand::Rng;

use crate::backend::{AudioBackend, TrackHandle};
use crate::error::PlaybackError;
use crate::library::{Library, SongId};

const DEFAULT_VOLUME: f32 = 0.2;

/// The per-frame-polled playback state the widgets read, plus the
/// previously-played history.
///
/// The history is a most-recent-first list of file paths with a replay
/// cursor `song_on` (0 = newest). Moving the cursor replays entries
/// without re-inserting them, so back/forward navigation never grows the
/// history; only [`play_song_save`](Self::play_song_save) and the random
/// pick of [`play_next`](Self::play_next) insert a new head.
pub struct Player {
    volume: f32,
    paused: bool,
    current: Option<SongId>,
    history: Vec<String>,
    song_on: usize,
    loaded: VecDeque<TrackHandle>,
    library: Library,
    backend: Box<dyn AudioBackend>,
}

impl Player {
    pub fn new(library: Library, mut backend: Box<dyn AudioBackend>) -> Self {
        backend.set_volume(DEFAULT_VOLUME);
        Self {
            volume: DEFAULT_VOLUME,
            paused: false,
            current: None,
            history: Vec::new(),
            song_on: 0,
            loaded: VecDeque::new(),
            library,
            backend,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn current_song(&self) -> Option<SongId> {
        self.current
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(PlaybackError::InvalidVolume(volume));
        }
        self.volume = volume;
        self.backend.set_volume(volume);
        Ok(())
    }

    /// Plays one song immediately, replacing whatever plays now. Does not
    /// touch the history.
    pub fn play_song(&mut self, id: SongId) -> Result<(), PlaybackError> {
        let path = self.library.path_of(id)?.to_string();
        self.play_path(&path)?;
        self.current = Some(id);
        Ok(())
    }

    /// Plays one song and records it as the new history head.
    pub fn play_song_save(&mut self, id: SongId) -> Result<(), PlaybackError> {
        self.play_song(id)?;
        let path = self.library.path_of(id)?.to_string();
        self.history.insert(0, path);
        self.song_on = 0;
        Ok(())
    }

    /// Moves forward through the history, or plays a random song when
    /// already at the most recent entry.
    pub fn play_next(&mut self) -> Result<(), PlaybackError> {
        if self.song_on != 0 {
            self.song_on -= 1;
            return self.replay_cursor();
        }
        if self.library.is_empty() {
            return Err(PlaybackError::EmptyLibrary);
        }
        let pick = rand::rng().random_range(0..self.library.len());
        let id = self.library.entries()[pick].id;
        self.play_song_save(id)
    }

    /// Replays the next-older history entry, when one exists.
    pub fn play_previous(&mut self) -> Result<(), PlaybackError> {
        if self.song_on + 1 >= self.history.len() {
            return Err(PlaybackError::NoOlderSong);
        }
        self.song_on += 1;
        self.replay_cursor()
    }

    pub fn toggle(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.backend.pause();
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.backend.resume();
    }

    pub fn halt(&mut self) {
        self.current = None;
        self.backend.halt();
    }

    /// Frame-loop poll: when the playing track ran to its natural end,
    /// frees the oldest decoded track and clears the current song.
    pub fn tick(&mut self) {
        if !self.backend.poll_finished() {
            return;
        }
        if let Some(oldest) = self.loaded.pop_front() {
            debug!("freeing finished track {oldest:?}");
            self.backend.free(oldest);
        }
        self.current = None;
    }

    fn replay_cursor(&mut self) -> Result<(), PlaybackError> {
        let path = self.history[self.song_on].clone();
        self.play_path(&path)?;
        self.current = self.library.id_of_path(&path);
        Ok(())
    }

    fn play_path(&mut self, path: &str) -> Result<(), PlaybackError> {
        self.backend.halt();
        let handle = self.backend.load(path)?;
        self.loaded.push_back(handle);
        self.backend.play(handle)?;
        self.paused = false;
        info!("playing {path}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::SongEntry;
    use crate::silent::SilentBackend;

    fn player_with(titles: &[&str]) -> Player {
        let entries = titles
            .iter()
            .map(|t| SongEntry::new(*t, format!("Music/{t}.mp3")))
            .collect();
        Player::new(Library::from_entries(entries), Box::new(SilentBackend::new()))
    }

    fn id_at(player: &Player, index: usize) -> SongId {
        player.library().entries()[index].id
    }

    #[test]
    fn next_on_empty_history_plays_random_and_saves() {
        let mut player = player_with(&["a", "b", "c"]);
        player.play_next().unwrap();
        assert_eq!(player.history().len(), 1);
        assert!(player.current_song().is_some());
        assert!(matches!(
            player.play_previous(),
            Err(PlaybackError::NoOlderSong)
        ));
    }

    #[test]
    fn next_on_empty_library_fails() {
        let mut player = player_with(&[]);
        assert!(matches!(player.play_next(), Err(PlaybackError::EmptyLibrary)));
    }

    #[test]
    fn back_and_forward_replay_without_reinserting() {
        let mut player = player_with(&["a", "b"]);
        let (a, b) = (id_at(&player, 0), id_at(&player, 1));
        player.play_song_save(a).unwrap();
        player.play_song_save(b).unwrap();
        assert_eq!(player.history().len(), 2);

        player.play_previous().unwrap();
        assert_eq!(player.current_song(), Some(a));
        player.play_next().unwrap();
        assert_eq!(player.current_song(), Some(b));
        assert_eq!(player.history().len(), 2);
    }

    #[test]
    fn saving_resets_the_cursor_to_the_new_head() {
        let mut player = player_with(&["a", "b", "c"]);
        let (a, b, c) = (id_at(&player, 0), id_at(&player, 1), id_at(&player, 2));
        player.play_song_save(a).unwrap();
        player.play_song_save(b).unwrap();
        player.play_previous().unwrap();
        player.play_song_save(c).unwrap();
        player.play_previous().unwrap();
        assert_eq!(player.current_song(), Some(b));
    }

    #[test]
    fn volume_outside_unit_range_is_rejected() {
        let mut player = player_with(&["a"]);
        assert!(matches!(
            player.set_volume(1.5),
            Err(PlaybackError::InvalidVolume(_))
        ));
        assert!(matches!(
            player.set_volume(-0.1),
            Err(PlaybackError::InvalidVolume(_))
        ));
        player.set_volume(0.3).unwrap();
        assert_eq!(player.volume(), 0.3);
    }

    #[test]
    fn toggle_flips_the_paused_flag() {
        let mut player = player_with(&["a"]);
        assert!(!player.is_paused());
        player.toggle();
        assert!(player.is_paused());
        player.toggle();
        assert!(!player.is_paused());
    }

    #[test]
    fn natural_completion_clears_the_current_song() {
        let library = Library::from_entries(vec![
            SongEntry::new("a", "Music/a.mp3"),
            SongEntry::new("b", "Music/b.mp3"),
        ]);
        let a = library.entries()[0].id;
        let b = library.entries()[1].id;
        let mut player = Player::new(library, Box::new(SilentBackend::new()));

        player.play_song_save(a).unwrap();
        player.play_song_save(b).unwrap();
        player.tick();
        assert_eq!(player.current_song(), Some(b));

        let mut backend = SilentBackend::new();
        backend.finish_current();
        let library = Library::from_entries(vec![SongEntry::new("c", "Music/c.mp3")]);
        let c = library.entries()[0].id;
        let mut player = Player::new(library, Box::new(backend));
        player.play_song_save(c).unwrap();
        player.tick();
        assert_eq!(player.current_song(), None);
    }

    #[test]
    fn failed_load_surfaces_a_typed_error() {
        let mut backend = SilentBackend::new();
        backend.failing_paths.push("Music/bad.mp3".to_string());
        let library = Library::from_entries(vec![SongEntry::new("bad", "Music/bad.mp3")]);
        let id = library.entries()[0].id;
        let mut player = Player::new(library, Box::new(backend));
        assert!(matches!(
            player.play_song(id),
            Err(PlaybackError::TrackLoad { .. })
        ));
        assert_eq!(player.current_song(), None);
    }
}
