//! # smarthome-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `PlaylistStore` — load & save the persisted playlist
//! - Define **driving/inbound ports** as use-case structs:
//!   - `SmartHomeFacade` — bulk on/off across both rooms and the player,
//!     plus logged single-device commands
//!   - `PlayerService` — logged player commands and playlist persistence
//! - Provide the shared-handle convention (`Arc<Mutex<_>>` per entity) used to
//!   hand the same room, player and log to both the facade and its callers
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod shared;
