//! # smarthomed — smarthome daemon
//!
//! Composition root that wires rooms, the player and the playlist file together
//! and drives them from a line-oriented command loop on stdin.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Build the configured rooms, the action log and the player
//! - Restore the persisted playlist
//! - Construct application services, injecting the playlist file store
//! - Read commands until `quit`, end of input or Ctrl-C
//! - Persist the playlist on the way out
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod command;
mod config;
mod input;
mod shell;

use std::io::BufReader;
use std::sync::Arc;

use smarthome_adapter_playlist_file::FilePlaylistStore;
use smarthome_app::services::home_facade::SmartHomeFacade;
use smarthome_app::services::player_service::PlayerService;
use smarthome_app::shared::shared;
use smarthome_domain::player::MusicPlayer;
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::config::Config;
use crate::input::spawn_line_reader;
use crate::shell::{Reply, Shell};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Domain objects, one lock each
    let [living_room, kitchen] = config.build_rooms()?.map(shared);
    let logger = shared(config.action_logger());
    let player = shared(MusicPlayer::new());

    // Services
    let store = FilePlaylistStore::new(&config.playlist.path);
    let player_service = PlayerService::new(Arc::clone(&player), Arc::clone(&logger), store);
    let restored = player_service.load_from_store();
    let facade = SmartHomeFacade::new(living_room, kitchen, player, logger);
    let shell = Shell::new(facade, player_service);

    tracing::info!(
        playlist = %config.playlist.path.display(),
        tracks = restored,
        "smarthomed ready"
    );
    println!("smarthomed ready, type `help` for commands");

    let mut lines = spawn_line_reader(BufReader::new(std::io::stdin()))?;
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    tracing::debug!("end of input");
                    break;
                };
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        tracing::error!(error = %err, "failed to read input");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => match shell.execute(command) {
                        Reply::Continue(text) => println!("{text}"),
                        Reply::Quit => break,
                    },
                    Err(err) => println!("{err}"),
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("interrupted");
                break;
            }
        }
    }

    if let Err(err) = shell.player().save_to_store() {
        eprintln!("playlist not saved: {err}");
    }
    // The input thread may still be blocked on stdin; returning ends it.
    tracing::info!("smarthomed stopped");
    Ok(())
}
