//! Track — a reference to a playable media file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A media file in a playlist. The display name is derived from the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    path: PathBuf,
    display_name: String,
}

impl Track {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = display_name_of(&path);
        Self { path, display_name }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component of the path (`b.mp3` for `/music/b.mp3`).
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl From<PathBuf> for Track {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

fn display_name_of(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}
