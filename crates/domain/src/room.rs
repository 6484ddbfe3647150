//! Room — a named registry of devices, one per [`DeviceKind`].

use serde::Serialize;

use crate::device::{Device, DeviceKind, PowerState};
use crate::error::{HomeError, ValidationError};

/// A named container of devices.
///
/// Devices are kept in the order they were added, which is the order bulk
/// operations visit them in. Devices are never removed.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    name: String,
    devices: Vec<Device>,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Create an empty room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HomeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(Self {
            name,
            devices: Vec::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a device under its kind.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::DuplicateDeviceKind`] if a device of the same kind
    /// is already registered; the existing device is kept.
    pub fn add_device(&mut self, device: Device) -> Result<(), HomeError> {
        if self.device(device.kind()).is_some() {
            return Err(HomeError::DuplicateDeviceKind {
                room: self.name.clone(),
                kind: device.kind().clone(),
            });
        }
        self.devices.push(device);
        Ok(())
    }

    #[must_use]
    pub fn device(&self, kind: &DeviceKind) -> Option<&Device> {
        self.devices.iter().find(|d| d.kind() == kind)
    }

    /// Devices in registration order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device_kinds(&self) -> impl Iterator<Item = &DeviceKind> {
        self.devices.iter().map(Device::kind)
    }

    /// Switch the device registered under `kind` on.
    ///
    /// Returns whether the device actually changed state; repeating the call
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::DeviceNotFound`] if no such device is registered.
    pub fn turn_on(&mut self, kind: &DeviceKind) -> Result<bool, HomeError> {
        self.set_state(kind, PowerState::On)
    }

    /// Switch the device registered under `kind` off.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::DeviceNotFound`] if no such device is registered.
    pub fn turn_off(&mut self, kind: &DeviceKind) -> Result<bool, HomeError> {
        self.set_state(kind, PowerState::Off)
    }

    /// Apply `state` to the device registered under `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::DeviceNotFound`] if no such device is registered.
    pub fn set_state(&mut self, kind: &DeviceKind, state: PowerState) -> Result<bool, HomeError> {
        let Some(device) = self.devices.iter_mut().find(|d| d.kind() == kind) else {
            return Err(HomeError::DeviceNotFound {
                room: self.name.clone(),
                kind: kind.clone(),
            });
        };
        Ok(device.set_state(state))
    }

    /// Apply `state` to every device, in registration order.
    ///
    /// Returns how many devices actually changed state.
    pub fn set_all(&mut self, state: PowerState) -> usize {
        self.devices
            .iter_mut()
            .map(|device| device.set_state(state))
            .filter(|changed| *changed)
            .count()
    }

    /// Whether every device in the room is on. Vacuously true for an empty room.
    #[must_use]
    pub fn all_on(&self) -> bool {
        self.devices.iter().all(Device::is_on)
    }

    /// Whether every device in the room is off.
    #[must_use]
    pub fn all_off(&self) -> bool {
        self.devices.iter().all(|d| !d.is_on())
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    name: Option<String>,
    kinds: Vec<DeviceKind>,
}

impl RoomBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device(mut self, kind: DeviceKind) -> Self {
        self.kinds.push(kind);
        self
    }

    #[must_use]
    pub fn devices(mut self, kinds: impl IntoIterator<Item = DeviceKind>) -> Self {
        self.kinds.extend(kinds);
        self
    }

    /// Consume the builder, validate, and return a [`Room`] with every
    /// device switched off.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] if `name` is missing or empty, or
    /// [`HomeError::DuplicateDeviceKind`] if a kind was given twice.
    pub fn build(self) -> Result<Room, HomeError> {
        let mut room = Room::new(self.name.unwrap_or_default())?;
        for kind in self.kinds {
            room.add_device(Device::new(kind))?;
        }
        Ok(room)
    }
}
