//! Executes parsed commands against the facade and the player service and
//! renders a plain-text reply.

use std::fmt::Write as _;

use smarthome_app::ports::PlaylistStore;
use smarthome_app::services::home_facade::{BulkReport, SmartHomeFacade};
use smarthome_app::services::player_service::PlayerService;
use smarthome_app::shared::lock;
use smarthome_domain::error::HomeError;

use crate::command::{Command, HELP};

/// What the command loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Continue(String),
    Quit,
}

pub struct Shell<S> {
    facade: SmartHomeFacade,
    player: PlayerService<S>,
}

impl<S: PlaylistStore> Shell<S> {
    pub fn new(facade: SmartHomeFacade, player: PlayerService<S>) -> Self {
        Self { facade, player }
    }

    pub fn player(&self) -> &PlayerService<S> {
        &self.player
    }

    /// Run one command. Domain failures become part of the reply; nothing
    /// here is fatal.
    pub fn execute(&self, command: Command) -> Reply {
        let text = match command {
            Command::Quit => return Reply::Quit,
            Command::Help => HELP.to_string(),
            Command::AllOn => describe_bulk(&self.facade.turn_all_on()),
            Command::AllOff => describe_bulk(&self.facade.turn_all_off()),
            Command::Switch { room, kind, state } => {
                match self.facade.switch_device(&room, &kind, state) {
                    Ok(_) => format!("{room}: {kind} {state}"),
                    Err(err) => describe_error(&err),
                }
            }
            Command::Load(paths) => match self.player.load_files(paths) {
                Ok(count) => {
                    let mut text = format!("loaded {count} tracks");
                    if let Err(err) = self.player.save_to_store() {
                        let _ = write!(text, " (not saved: {})", describe_error(&err));
                    }
                    text
                }
                Err(err) => describe_error(&err),
            },
            Command::Play(None) => now_playing(self.player.play()),
            Command::Play(Some(index)) => now_playing(self.player.play_at(index)),
            Command::Pause => {
                self.player.pause();
                format!("⏸ {}", self.player.current_track_name())
            }
            Command::Stop => {
                self.player.stop();
                format!("■ {}", self.player.current_track_name())
            }
            Command::Next => now_playing(self.player.next()),
            Command::Prev => now_playing(self.player.prev()),
            Command::Status => self.status(),
            Command::Log => lock(self.facade.logger()).lines().join("\n"),
            Command::Save => match self.player.save_to_store() {
                Ok(()) => "playlist saved".to_string(),
                Err(err) => describe_error(&err),
            },
        };
        Reply::Continue(text)
    }

    fn status(&self) -> String {
        let mut text = String::new();
        for handle in self.facade.rooms() {
            let room = lock(handle);
            let _ = write!(text, "{}:", room.name());
            for device in room.devices() {
                let _ = write!(text, " {}={}", device.kind(), device.state());
            }
            text.push('\n');
        }

        let snapshot = self.player.snapshot();
        let _ = write!(
            text,
            "player: {} [{}]",
            snapshot.status, snapshot.current_track
        );
        for (index, name) in snapshot.tracks.iter().enumerate() {
            let marker = if snapshot.current_index == Some(index) {
                '>'
            } else {
                ' '
            };
            let _ = write!(text, "\n {marker} {index}. {name}");
        }
        text
    }
}

fn now_playing(result: Result<String, HomeError>) -> String {
    match result {
        Ok(name) => format!("▶ {name}"),
        Err(err) => describe_error(&err),
    }
}

fn describe_bulk(report: &BulkReport) -> String {
    if report.is_complete() {
        return "done".to_string();
    }
    let mut text = "done with failures:".to_string();
    for failure in &report.failures {
        let _ = write!(text, "\n  {}: {}", failure.target, failure.error);
    }
    text
}

fn describe_error(err: &HomeError) -> String {
    let mut text = format!("error: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let _ = write!(text, ": {cause}");
        source = std::error::Error::source(cause);
    }
    text
}
