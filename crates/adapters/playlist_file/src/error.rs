//! Playlist file error types.

use std::path::PathBuf;

use smarthome_domain::error::HomeError;

/// Errors originating from the playlist file.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistFileError {
    /// The file exists but could not be read (permissions, invalid UTF-8, …).
    #[error("failed to read playlist file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written.
    #[error("failed to write playlist file {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A track path cannot be stored as a single UTF-8 line.
    #[error("track path {0:?} cannot be stored as a UTF-8 line")]
    UnrepresentablePath(PathBuf),
}

impl From<PlaylistFileError> for HomeError {
    fn from(err: PlaylistFileError) -> Self {
        match err {
            PlaylistFileError::Read { .. } => Self::PersistenceRead(Box::new(err)),
            PlaylistFileError::Write { .. } | PlaylistFileError::UnrepresentablePath(_) => {
                Self::PersistenceWrite(Box::new(err))
            }
        }
    }
}
