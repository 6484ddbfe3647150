//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HomeError`]
//! via `From` (see the playlist file adapter for an example).

use std::path::PathBuf;

use crate::device::DeviceKind;

/// Boxed source error carried by persistence failures.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for every smarthome operation.
///
/// None of these are fatal: precondition failures leave the model untouched
/// and persistence failures never roll back in-memory state.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    /// A domain value failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A command addressed a kind with no device registered in the room.
    #[error("no {kind} device in room {room:?}")]
    DeviceNotFound { room: String, kind: DeviceKind },

    /// A room already holds a device of this kind.
    #[error("room {room:?} already has a {kind} device")]
    DuplicateDeviceKind { room: String, kind: DeviceKind },

    /// No room with this name is known to the facade.
    #[error("no room named {name:?}")]
    RoomNotFound { name: String },

    /// Playback or navigation was attempted on an empty playlist.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// A direct-index play was attempted outside the playlist bounds.
    #[error("track index {index} out of range for a playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// A track path did not point at an existing file when it was added.
    #[error("track file {path:?} does not exist")]
    TrackMissing { path: PathBuf },

    /// The persisted playlist could not be read.
    #[error("failed to read persisted playlist")]
    PersistenceRead(#[source] BoxedSource),

    /// The playlist could not be persisted.
    #[error("failed to write persisted playlist")]
    PersistenceWrite(#[source] BoxedSource),
}

/// Domain invariant violations detected while building values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A name that must be non-empty was empty (room name, custom device kind).
    #[error("name must not be empty")]
    EmptyName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_with_from() {
        let err: HomeError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            HomeError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_describe_missing_device() {
        let err = HomeError::DeviceNotFound {
            room: "Kitchen".to_string(),
            kind: DeviceKind::Speaker,
        };
        assert_eq!(err.to_string(), "no Speaker device in room \"Kitchen\"");
    }

    #[test]
    fn should_describe_index_out_of_range() {
        let err = HomeError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "track index 5 out of range for a playlist of 3 tracks"
        );
    }

    #[test]
    fn should_expose_persistence_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = HomeError::PersistenceWrite(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "denied");
    }
}
