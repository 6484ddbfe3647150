//! Application services — use-case implementations.
//!
//! Services share domain objects through [`Shared`](crate::shared::Shared)
//! handles and receive port implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod home_facade;
pub mod player_service;
