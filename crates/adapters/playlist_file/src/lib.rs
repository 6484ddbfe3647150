//! # smarthome-adapter-playlist-file
//!
//! Persists the playlist as a plain text file:
//!
//! - UTF-8, one track path per line, no header
//! - read in full on load, rewritten in full on save
//! - saved through a sibling temporary file renamed over the old one, so a
//!   failed save leaves the previous playlist intact
//! - a missing file and an empty file both mean an empty playlist
//!
//! Blank lines are ignored on load.
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-app` (port traits) and `smarthome-domain` only.

mod error;

use std::io::Write;
use std::path::{Path, PathBuf};

use smarthome_app::ports::PlaylistStore;
use smarthome_domain::error::HomeError;

pub use error::PlaylistFileError;

/// [`PlaylistStore`] backed by a single text file.
#[derive(Debug, Clone)]
pub struct FilePlaylistStore {
    path: PathBuf,
}

impl FilePlaylistStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<PathBuf>, PlaylistFileError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no playlist file yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PlaylistFileError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            .collect())
    }

    fn write(&self, paths: &[PathBuf]) -> Result<(), PlaylistFileError> {
        let mut content = String::new();
        for path in paths {
            let line = path
                .to_str()
                .filter(|s| !s.contains(['\n', '\r']))
                .ok_or_else(|| PlaylistFileError::UnrepresentablePath(path.clone()))?;
            content.push_str(line);
            content.push('\n');
        }

        self.replace_with(content.as_bytes())
            .map_err(|source| PlaylistFileError::Write {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), count = paths.len(), "playlist file written");
        Ok(())
    }

    fn replace_with(&self, content: &[u8]) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(content)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl PlaylistStore for FilePlaylistStore {
    fn load(&self) -> Result<Vec<PathBuf>, HomeError> {
        Ok(self.read()?)
    }

    fn save(&self, paths: &[PathBuf]) -> Result<(), HomeError> {
        Ok(self.write(paths)?)
    }
}
