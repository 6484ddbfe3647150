//! Music player — playlist metadata, a cursor, and a playback status.
//!
//! The player owns no audio engine. It tracks *which* track is current and
//! whether the user asked for it to be playing, paused or stopped.
//!
//! ```text
//!            play / play_at                pause
//!  Stopped ─────────────────▶ Playing ─────────────▶ Paused
//!     ▲                        │  ▲                    │
//!     └──────── stop ──────────┘  └──── play / play_at ┘
//! ```
//!
//! `next_track` / `prev_track` wrap around and keep the current status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HomeError;
use crate::track::Track;

/// Display value of [`MusicPlayer::current_track_name`] when the playlist is empty.
pub const NO_TRACK: &str = "-";

/// Playback status requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => f.write_str("stopped"),
            Self::Playing => f.write_str("playing"),
            Self::Paused => f.write_str("paused"),
        }
    }
}

/// Position in the playlist.
///
/// `At(i)` always holds a valid index; an empty playlist is `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Empty,
    At(usize),
}

impl Cursor {
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::At(index) => Some(index),
        }
    }
}

/// What happens to the cursor and status when the playlist is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionPolicy {
    /// Back to the first track, stopped.
    #[default]
    Reset,
    /// Keep the index (clamped to the new length) and the status.
    Preserve,
}

/// Read-only view of the player for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub status: PlaybackStatus,
    pub current_index: Option<usize>,
    pub current_track: String,
    pub tracks: Vec<String>,
}

/// Playlist plus cursor plus status.
#[derive(Debug, Clone, Default)]
pub struct MusicPlayer {
    playlist: Vec<Track>,
    cursor: Cursor,
    status: PlaybackStatus,
}

impl MusicPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopped player positioned on the first of `tracks`.
    #[must_use]
    pub fn with_playlist(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut player = Self::new();
        player.load_playlist(tracks);
        player
    }

    #[must_use]
    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.cursor.index()
    }

    #[must_use]
    pub fn current_track(&self) -> Option<&Track> {
        self.cursor.index().and_then(|i| self.playlist.get(i))
    }

    /// Display name of the current track, or [`NO_TRACK`].
    #[must_use]
    pub fn current_track_name(&self) -> &str {
        self.current_track().map_or(NO_TRACK, Track::display_name)
    }

    /// Replace the playlist, back on the first track and stopped.
    pub fn load_playlist(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.replace_playlist(tracks, PositionPolicy::Reset);
    }

    /// Replace the playlist according to `policy`.
    ///
    /// An empty replacement always ends up `Empty` and stopped.
    pub fn replace_playlist(
        &mut self,
        tracks: impl IntoIterator<Item = Track>,
        policy: PositionPolicy,
    ) {
        let previous = self.cursor.index();
        self.playlist = tracks.into_iter().collect();

        if self.playlist.is_empty() {
            self.cursor = Cursor::Empty;
            self.status = PlaybackStatus::Stopped;
            return;
        }

        match policy {
            PositionPolicy::Reset => {
                self.cursor = Cursor::At(0);
                self.status = PlaybackStatus::Stopped;
            }
            PositionPolicy::Preserve => {
                let last = self.playlist.len() - 1;
                self.cursor = Cursor::At(previous.unwrap_or(0).min(last));
            }
        }
    }

    /// Start or resume playback on the current track.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::EmptyPlaylist`] without changing anything when
    /// there are no tracks.
    pub fn play(&mut self) -> Result<&Track, HomeError> {
        let Cursor::At(index) = self.cursor else {
            return Err(HomeError::EmptyPlaylist);
        };
        self.status = PlaybackStatus::Playing;
        Ok(&self.playlist[index])
    }

    /// Jump to `index` and play it.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::IndexOutOfRange`] without changing anything when
    /// `index` is not a valid position.
    pub fn play_at(&mut self, index: usize) -> Result<&Track, HomeError> {
        if index >= self.playlist.len() {
            return Err(HomeError::IndexOutOfRange {
                index,
                len: self.playlist.len(),
            });
        }
        self.cursor = Cursor::At(index);
        self.status = PlaybackStatus::Playing;
        Ok(&self.playlist[index])
    }

    /// Pause if playing. Returns whether the status changed.
    pub fn pause(&mut self) -> bool {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
            true
        } else {
            false
        }
    }

    /// Stop, keeping the cursor for a later resume. Returns whether the status changed.
    pub fn stop(&mut self) -> bool {
        let changed = self.status != PlaybackStatus::Stopped;
        self.status = PlaybackStatus::Stopped;
        changed
    }

    /// Advance one track, wrapping to the first after the last.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::EmptyPlaylist`] when there are no tracks.
    pub fn next_track(&mut self) -> Result<&Track, HomeError> {
        self.step(|index, len| (index + 1) % len)
    }

    /// Go back one track, wrapping to the last before the first.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::EmptyPlaylist`] when there are no tracks.
    pub fn prev_track(&mut self) -> Result<&Track, HomeError> {
        self.step(|index, len| (index + len - 1) % len)
    }

    fn step(&mut self, move_by: impl Fn(usize, usize) -> usize) -> Result<&Track, HomeError> {
        let Cursor::At(index) = self.cursor else {
            return Err(HomeError::EmptyPlaylist);
        };
        let next = move_by(index, self.playlist.len());
        self.cursor = Cursor::At(next);
        Ok(&self.playlist[next])
    }

    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            status: self.status,
            current_index: self.cursor.index(),
            current_track: self.current_track_name().to_string(),
            tracks: self
                .playlist
                .iter()
                .map(|t| t.display_name().to_string())
                .collect(),
        }
    }
}
