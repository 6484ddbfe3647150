//! Playlist store port — persistence for the ordered list of track paths.

use std::path::PathBuf;
use std::sync::Arc;

use smarthome_domain::error::HomeError;

/// Loads and saves the persisted playlist.
///
/// Implementations are synchronous: the persisted playlist is small and read
/// or written in full on every call.
pub trait PlaylistStore {
    /// Read the persisted track paths in order.
    ///
    /// A store that has never been written must return an empty list rather
    /// than an error.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::PersistenceRead`] when existing data cannot be read.
    fn load(&self) -> Result<Vec<PathBuf>, HomeError>;

    /// Replace the persisted playlist with `paths`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::PersistenceWrite`] when the data cannot be written.
    fn save(&self, paths: &[PathBuf]) -> Result<(), HomeError>;
}

impl<T: PlaylistStore + ?Sized> PlaylistStore for Arc<T> {
    fn load(&self) -> Result<Vec<PathBuf>, HomeError> {
        (**self).load()
    }

    fn save(&self, paths: &[PathBuf]) -> Result<(), HomeError> {
        (**self).save(paths)
    }
}

impl<T: PlaylistStore + ?Sized> PlaylistStore for &T {
    fn load(&self) -> Result<Vec<PathBuf>, HomeError> {
        (**self).load()
    }

    fn save(&self, paths: &[PathBuf]) -> Result<(), HomeError> {
        (**self).save(paths)
    }
}
