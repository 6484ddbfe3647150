//! Player service — logged player commands and playlist persistence.

use std::path::PathBuf;

use smarthome_domain::action_log::ActionLogger;
use smarthome_domain::error::HomeError;
use smarthome_domain::player::{MusicPlayer, PlayerSnapshot};
use smarthome_domain::track::Track;

use crate::ports::PlaylistStore;
use crate::shared::{Shared, lock, record};

/// Action log source used for player entries.
pub const PLAYER_SOURCE: &str = "Player";

/// Application service driving the shared [`MusicPlayer`].
///
/// Every command that changes the player appends one entry to the action
/// log. Failed commands leave both the player and the log untouched.
pub struct PlayerService<S> {
    player: Shared<MusicPlayer>,
    logger: Shared<ActionLogger>,
    store: S,
}

impl<S: PlaylistStore> PlayerService<S> {
    /// Create a new service over the shared player and log, persisting to `store`.
    pub fn new(player: Shared<MusicPlayer>, logger: Shared<ActionLogger>, store: S) -> Self {
        Self {
            player,
            logger,
            store,
        }
    }

    /// The shared player handle driven by this service.
    #[must_use]
    pub fn player(&self) -> &Shared<MusicPlayer> {
        &self.player
    }

    /// Replace the playlist with `paths`, in order, stopped on the first track.
    ///
    /// Returns the number of tracks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::TrackMissing`] if any path is not an existing
    /// file; the current playlist is kept.
    #[tracing::instrument(skip(self, paths), fields(count = paths.len()))]
    pub fn load_files(&self, paths: Vec<PathBuf>) -> Result<usize, HomeError> {
        if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
            return Err(HomeError::TrackMissing {
                path: missing.clone(),
            });
        }
        let count = paths.len();
        lock(&self.player).load_playlist(paths.into_iter().map(Track::new));
        record(
            &self.logger,
            PLAYER_SOURCE,
            &format!("playlist loaded ({count} tracks)"),
        );
        Ok(count)
    }

    /// Replace the playlist with whatever the store holds.
    ///
    /// Never fails: an unreadable store yields an empty playlist, and entries
    /// whose file has disappeared are skipped. Returns the number of tracks
    /// loaded.
    #[tracing::instrument(skip(self))]
    pub fn load_from_store(&self) -> usize {
        let paths = match self.store.load() {
            Ok(paths) => paths,
            Err(err) => {
                tracing::warn!(error = %err, "persisted playlist unreadable, starting empty");
                Vec::new()
            }
        };

        let tracks: Vec<Track> = paths
            .into_iter()
            .filter(|path| {
                let exists = path.is_file();
                if !exists {
                    tracing::warn!(path = %path.display(), "skipping missing track");
                }
                exists
            })
            .map(Track::new)
            .collect();

        let count = tracks.len();
        lock(&self.player).load_playlist(tracks);
        tracing::info!(count, "playlist restored");
        count
    }

    /// Persist the current playlist. The in-memory player is never affected.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::PersistenceWrite`] propagated from the store.
    #[tracing::instrument(skip(self))]
    pub fn save_to_store(&self) -> Result<(), HomeError> {
        let paths: Vec<PathBuf> = lock(&self.player)
            .playlist()
            .iter()
            .map(|t| t.path().to_path_buf())
            .collect();

        self.store.save(&paths).inspect_err(|err| {
            tracing::warn!(error = %err, "failed to persist playlist");
        })
    }

    /// Start or resume playback. Returns the current track name.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::EmptyPlaylist`] when there is nothing to play.
    #[tracing::instrument(skip(self))]
    pub fn play(&self) -> Result<String, HomeError> {
        let name = lock(&self.player).play()?.display_name().to_string();
        record(&self.logger, PLAYER_SOURCE, &format!("playing {name}"));
        Ok(name)
    }

    /// Jump to `index` and play it. Returns the track name.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::IndexOutOfRange`] for an invalid index.
    #[tracing::instrument(skip(self))]
    pub fn play_at(&self, index: usize) -> Result<String, HomeError> {
        let name = lock(&self.player).play_at(index)?.display_name().to_string();
        record(&self.logger, PLAYER_SOURCE, &format!("playing {name}"));
        Ok(name)
    }

    /// Pause if playing. Returns whether anything changed.
    #[tracing::instrument(skip(self))]
    pub fn pause(&self) -> bool {
        let changed = lock(&self.player).pause();
        if changed {
            record(&self.logger, PLAYER_SOURCE, "paused");
        }
        changed
    }

    /// Stop playback, keeping the position. Returns whether anything changed.
    #[tracing::instrument(skip(self))]
    pub fn stop(&self) -> bool {
        let changed = lock(&self.player).stop();
        if changed {
            record(&self.logger, PLAYER_SOURCE, "stopped");
        }
        changed
    }

    /// Move to the next track (wrapping). Returns the new track name.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::EmptyPlaylist`] when there are no tracks.
    #[tracing::instrument(skip(self))]
    pub fn next(&self) -> Result<String, HomeError> {
        let name = lock(&self.player).next_track()?.display_name().to_string();
        record(&self.logger, PLAYER_SOURCE, &format!("switched to {name}"));
        Ok(name)
    }

    /// Move to the previous track (wrapping). Returns the new track name.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::EmptyPlaylist`] when there are no tracks.
    #[tracing::instrument(skip(self))]
    pub fn prev(&self) -> Result<String, HomeError> {
        let name = lock(&self.player).prev_track()?.display_name().to_string();
        record(&self.logger, PLAYER_SOURCE, &format!("switched to {name}"));
        Ok(name)
    }

    #[must_use]
    pub fn current_track_name(&self) -> String {
        lock(&self.player).current_track_name().to_string()
    }

    #[must_use]
    pub fn playlist(&self) -> Vec<Track> {
        lock(&self.player).playlist().to_vec()
    }

    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        lock(&self.player).snapshot()
    }
}
