//! Smart home facade — one entry point for bulk and single-device control.

use smarthome_domain::action_log::ActionLogger;
use smarthome_domain::device::{DeviceKind, PowerState};
use smarthome_domain::error::HomeError;
use smarthome_domain::player::MusicPlayer;
use smarthome_domain::room::Room;

use crate::services::player_service::PLAYER_SOURCE;
use crate::shared::{Shared, lock, record};

/// A target that could not be switched during a bulk operation.
#[derive(Debug)]
pub struct BulkFailure {
    /// Log source of the failed target, [`PLAYER_SOURCE`] for the player.
    pub target: String,
    pub error: HomeError,
}

/// Outcome of [`SmartHomeFacade::turn_all_on`] / [`SmartHomeFacade::turn_all_off`].
///
/// Bulk operations never stop at the first failure; everything is attempted
/// and what failed is listed here.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub failures: Vec<BulkFailure>,
}

impl BulkReport {
    /// Whether both rooms and the player reached the requested state.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fans coarse commands out to both rooms and the player, and records what
/// happened in the shared action log.
///
/// The facade holds the same handles its callers use for fine-grained control;
/// it never copies room or player state. It addresses exactly two rooms, fixed
/// at construction and always visited in construction order, so every bulk
/// call appends exactly three log entries.
pub struct SmartHomeFacade {
    rooms: [Shared<Room>; 2],
    player: Shared<MusicPlayer>,
    logger: Shared<ActionLogger>,
}

impl SmartHomeFacade {
    pub fn new(
        living_room: Shared<Room>,
        kitchen: Shared<Room>,
        player: Shared<MusicPlayer>,
        logger: Shared<ActionLogger>,
    ) -> Self {
        Self {
            rooms: [living_room, kitchen],
            player,
            logger,
        }
    }

    /// Switch every device in both rooms on, then start the player.
    ///
    /// Appends one entry per room, then one for the player, in that order.
    /// An empty playlist is reported in the returned [`BulkReport`]; the rooms
    /// are switched regardless.
    #[tracing::instrument(skip(self))]
    pub fn turn_all_on(&self) -> BulkReport {
        let mut report = BulkReport::default();
        let summaries = self.switch_rooms(PowerState::On);

        let player_summary = match lock(&self.player).play() {
            Ok(track) => format!("music started: {}", track.display_name()),
            Err(error) => {
                let summary = format!("music not started: {error}");
                report.failures.push(BulkFailure {
                    target: PLAYER_SOURCE.to_string(),
                    error,
                });
                summary
            }
        };

        self.record_summaries(summaries, &player_summary);
        report
    }

    /// Switch every device in both rooms off, then stop the player.
    ///
    /// Appends one entry per room, then one for the player, in that order.
    #[tracing::instrument(skip(self))]
    pub fn turn_all_off(&self) -> BulkReport {
        let summaries = self.switch_rooms(PowerState::Off);
        lock(&self.player).stop();
        self.record_summaries(summaries, "music stopped");
        BulkReport::default()
    }

    /// Switch a single device and log it under the room's name.
    ///
    /// Returns whether the device changed state. The entry is logged even when
    /// the device was already in the requested state.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::RoomNotFound`] for an unknown room, or
    /// [`HomeError::DeviceNotFound`] if the room has no device of that kind.
    #[tracing::instrument(skip(self))]
    pub fn switch_device(
        &self,
        room_name: &str,
        kind: &DeviceKind,
        state: PowerState,
    ) -> Result<bool, HomeError> {
        let room = self.room(room_name).ok_or_else(|| HomeError::RoomNotFound {
            name: room_name.to_string(),
        })?;
        let changed = lock(room).set_state(kind, state)?;
        record(
            &self.logger,
            room_name,
            &format!("{} turned {state}", kind.noun()),
        );
        Ok(changed)
    }

    /// Rooms in construction order.
    #[must_use]
    pub fn rooms(&self) -> &[Shared<Room>] {
        &self.rooms
    }

    #[must_use]
    pub fn room(&self, name: &str) -> Option<&Shared<Room>> {
        self.rooms.iter().find(|handle| lock(*handle).name() == name)
    }

    #[must_use]
    pub fn player(&self) -> &Shared<MusicPlayer> {
        &self.player
    }

    #[must_use]
    pub fn logger(&self) -> &Shared<ActionLogger> {
        &self.logger
    }

    /// Apply `state` to every device of both rooms.
    /// Returns one `(room name, summary)` pair per room.
    fn switch_rooms(&self, state: PowerState) -> Vec<(String, String)> {
        self.rooms
            .iter()
            .map(|handle| {
                let mut room = lock(handle);
                let changed = room.set_all(state);
                tracing::debug!(room = room.name(), changed, "room switched");
                (room.name().to_string(), format!("all devices turned {state}"))
            })
            .collect()
    }

    fn record_summaries(&self, rooms: Vec<(String, String)>, player_summary: &str) {
        for (name, summary) in rooms {
            record(&self.logger, &name, &summary);
        }
        record(&self.logger, PLAYER_SOURCE, player_summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::player::PlaybackStatus;
    use smarthome_domain::track::Track;
    use std::sync::Arc;

    use crate::shared::shared;

    fn room(name: &str) -> Shared<Room> {
        shared(
            Room::builder()
                .name(name)
                .devices([
                    DeviceKind::Light,
                    DeviceKind::AirConditioner,
                    DeviceKind::Speaker,
                ])
                .build()
                .unwrap(),
        )
    }

    fn make_facade(tracks: &[&str]) -> SmartHomeFacade {
        SmartHomeFacade::new(
            room("Living Room"),
            room("Kitchen"),
            shared(MusicPlayer::with_playlist(
                tracks.iter().copied().map(Track::new),
            )),
            shared(ActionLogger::new()),
        )
    }

    fn log_lines(facade: &SmartHomeFacade) -> Vec<String> {
        lock(facade.logger()).lines()
    }

    #[test]
    fn should_turn_everything_on_and_start_music() {
        let facade = make_facade(&["a.mp3", "b.mp3"]);

        let report = facade.turn_all_on();

        assert!(report.is_complete());
        for handle in facade.rooms() {
            assert!(lock(handle).all_on());
        }
        assert_eq!(lock(facade.player()).status(), PlaybackStatus::Playing);
        assert_eq!(
            log_lines(&facade),
            vec![
                "Living Room: all devices turned on",
                "Kitchen: all devices turned on",
                "Player: music started: a.mp3",
            ]
        );
    }

    #[test]
    fn should_turn_everything_off_and_stop_music() {
        let facade = make_facade(&["a.mp3", "b.mp3"]);
        facade.turn_all_on();
        lock(facade.player()).next_track().unwrap();

        let report = facade.turn_all_off();

        assert!(report.is_complete());
        for handle in facade.rooms() {
            assert!(lock(handle).all_off());
        }
        let player = lock(facade.player());
        assert_eq!(player.status(), PlaybackStatus::Stopped);
        assert_eq!(player.current_index(), Some(1));
        drop(player);
        assert_eq!(
            log_lines(&facade)[3..],
            [
                "Living Room: all devices turned off",
                "Kitchen: all devices turned off",
                "Player: music stopped",
            ]
        );
    }

    #[test]
    fn should_append_exactly_three_entries_per_bulk_call() {
        let facade = make_facade(&["a.mp3"]);
        facade.turn_all_on();
        assert_eq!(lock(facade.logger()).len(), 3);
        facade.turn_all_off();
        assert_eq!(lock(facade.logger()).len(), 6);
    }

    #[test]
    fn should_switch_rooms_that_were_partly_on() {
        let facade = make_facade(&["a.mp3"]);
        facade
            .switch_device("Kitchen", &DeviceKind::Speaker, PowerState::On)
            .unwrap();

        let report = facade.turn_all_on();

        assert!(report.is_complete());
        assert!(facade.rooms().iter().all(|handle| lock(handle).all_on()));
        assert_eq!(
            log_lines(&facade)[1..3],
            [
                "Living Room: all devices turned on",
                "Kitchen: all devices turned on",
            ]
        );
    }

    #[test]
    fn should_report_empty_playlist_but_still_switch_rooms() {
        let facade = make_facade(&[]);

        let report = facade.turn_all_on();

        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, PLAYER_SOURCE);
        assert!(matches!(report.failures[0].error, HomeError::EmptyPlaylist));
        for handle in facade.rooms() {
            assert!(lock(handle).all_on());
        }
        assert_eq!(lock(facade.player()).status(), PlaybackStatus::Stopped);
        assert_eq!(
            log_lines(&facade)[2],
            "Player: music not started: playlist is empty"
        );
    }

    #[test]
    fn should_share_room_handles_with_callers() {
        let living = room("Living Room");
        let facade = SmartHomeFacade::new(
            Arc::clone(&living),
            room("Kitchen"),
            shared(MusicPlayer::new()),
            shared(ActionLogger::new()),
        );

        lock(&living).turn_on(&DeviceKind::Light).unwrap();
        let seen = lock(&facade.rooms()[0])
            .device(&DeviceKind::Light)
            .unwrap()
            .is_on();
        assert!(seen);

        facade.turn_all_off();
        assert!(lock(&living).all_off());
    }

    #[test]
    fn should_switch_single_device_and_log_it() {
        let facade = make_facade(&[]);

        let changed = facade
            .switch_device("Kitchen", &DeviceKind::AirConditioner, PowerState::On)
            .unwrap();

        assert!(changed);
        let kitchen = facade.room("Kitchen").unwrap();
        assert!(lock(kitchen).device(&DeviceKind::AirConditioner).unwrap().is_on());
        assert!(!lock(kitchen).device(&DeviceKind::Light).unwrap().is_on());
        assert_eq!(log_lines(&facade), vec!["Kitchen: air conditioner turned on"]);
    }

    #[test]
    fn should_return_room_not_found_for_unknown_room() {
        let facade = make_facade(&[]);
        let result = facade.switch_device("Attic", &DeviceKind::Light, PowerState::On);
        assert!(matches!(result, Err(HomeError::RoomNotFound { .. })));
        assert!(log_lines(&facade).is_empty());
    }

    #[test]
    fn should_return_device_not_found_without_logging() {
        let facade = SmartHomeFacade::new(
            shared(
                Room::builder()
                    .name("Hall")
                    .device(DeviceKind::Light)
                    .build()
                    .unwrap(),
            ),
            room("Kitchen"),
            shared(MusicPlayer::new()),
            shared(ActionLogger::new()),
        );

        let result = facade.switch_device("Hall", &DeviceKind::Speaker, PowerState::On);

        assert!(matches!(result, Err(HomeError::DeviceNotFound { .. })));
        assert!(log_lines(&facade).is_empty());
    }
}
