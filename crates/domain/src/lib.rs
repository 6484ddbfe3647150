//! # smarthome-domain
//!
//! Pure domain model for the smarthome controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Devices** (binary on/off units identified by a [`DeviceKind`](device::DeviceKind))
//! - Define **Rooms** (named registries holding at most one device per kind)
//! - Define the **Action log** (append-only record of what happened)
//! - Define **Tracks** and the **Music player** state machine (cursor, status, navigation)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod action_log;
pub mod device;
pub mod player;
pub mod room;
pub mod track;
