//! The scanned music library.

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use log::{info, warn};
use walkdir::WalkDir;

use crate::error::PlaybackError;

/// Identity of a scanned song, generator-assigned and never reused.
///
/// Song ids come from their own counter, independent of UI node ids; the
/// two are never comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SongId(u32);

static NEXT_SONG_ID: AtomicU32 = AtomicU32::new(0);

impl SongId {
    fn next() -> Self {
        Self(NEXT_SONG_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One entry of the library, created at scan time and immutable after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongEntry {
    pub id: SongId,
    pub title: String,
    pub path: String,
}

impl SongEntry {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: SongId::next(),
            title: title.into(),
            path: path.into(),
        }
    }
}

/// The set of playable files found under the music folder.
#[derive(Default)]
pub struct Library {
    entries: Vec<SongEntry>,
}

impl Library {
    /// Scans one directory level for `.mp3` files.
    ///
    /// The extension match is case-sensitive on the substring after the
    /// last `.`, so `song.MP3` is skipped. Backslashes are normalized to
    /// forward slashes and the title is the substring between the last `/`
    /// and the last `.`.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, PlaybackError> {
        let dir = dir.as_ref();
        let mut entries = Vec::new();

        for item in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let item = item.map_err(|err| PlaybackError::Scan {
                path: dir.display().to_string(),
                source: err.into(),
            })?;
            if !item.file_type().is_file() {
                continue;
            }
            let path = item.path().display().to_string().replace('\\', "/");
            match extension(&path) {
                Some("mp3") => {
                    let title = derive_title(&path);
                    entries.push(SongEntry::new(title, path));
                }
                _ => warn!("{path} skipped, not a music file"),
            }
        }

        info!("scanned {} songs from {}", entries.len(), dir.display());
        Ok(Self { entries })
    }

    /// A library over pre-built entries, used by tests.
    pub fn from_entries(entries: Vec<SongEntry>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[SongEntry] {
        &self.entries
    }

    pub fn path_of(&self, id: SongId) -> Result<&str, PlaybackError> {
        self.entry_of(id).map(|e| e.path.as_str())
    }

    pub fn title_of(&self, id: SongId) -> Result<&str, PlaybackError> {
        self.entry_of(id).map(|e| e.title.as_str())
    }

    pub fn id_of_path(&self, path: &str) -> Option<SongId> {
        self.entries.iter().find(|e| e.path == path).map(|e| e.id)
    }

    fn entry_of(&self, id: SongId) -> Result<&SongEntry, PlaybackError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(PlaybackError::UnknownSong(id))
    }
}

/// The substring after the last `.`, when one exists.
fn extension(path: &str) -> Option<&str> {
    path.rfind('.').map(|dot| &path[dot + 1..])
}

/// The display title: between the last `/` and the last `.`, empty when
/// the last dot does not follow the last slash.
fn derive_title(path: &str) -> String {
    let after_slash = path.rfind('/').map(|s| s + 1).unwrap_or(0);
    match path.rfind('.') {
        Some(dot) if dot > after_slash => path[after_slash..dot].to_string(),
        _ => String::new(),
    }
}
