//! Device — a binary-state unit living in a room (light, air conditioner, speaker, …).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What a device is. A room holds at most one device per kind.
///
/// The built-in kinds cover what a stock installation wires up; anything else
/// goes through [`Other`](Self::Other) so the set stays open.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeviceKind {
    Light,
    AirConditioner,
    Speaker,
    Other(String),
}

impl DeviceKind {
    /// Short label used in configuration and commands (`Light`, `AC`, …).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Light => "Light",
            Self::AirConditioner => "AC",
            Self::Speaker => "Speaker",
            Self::Other(name) => name,
        }
    }

    /// Lowercase noun used in human-readable log messages.
    #[must_use]
    pub fn noun(&self) -> String {
        match self {
            Self::Light => "light".to_string(),
            Self::AirConditioner => "air conditioner".to_string(),
            Self::Speaker => "speaker".to_string(),
            Self::Other(name) => name.to_lowercase(),
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Err(ValidationError::EmptyName),
            "light" => Ok(Self::Light),
            "ac" | "air_conditioner" | "air-conditioner" => Ok(Self::AirConditioner),
            "speaker" => Ok(Self::Speaker),
            _ => Ok(Self::Other(trimmed.to_string())),
        }
    }
}

impl TryFrom<String> for DeviceKind {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeviceKind> for String {
    fn from(kind: DeviceKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Power state of a device. There is no transitional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    #[default]
    Off,
}

impl PowerState {
    /// Whether this is [`On`](Self::On).
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// A single controllable unit. Starts switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    kind: DeviceKind,
    state: PowerState,
}

impl Device {
    #[must_use]
    pub fn new(kind: DeviceKind) -> Self {
        Self {
            kind,
            state: PowerState::Off,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    #[must_use]
    pub fn state(&self) -> PowerState {
        self.state
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    /// Apply `state`, returning whether anything changed.
    pub fn set_state(&mut self, state: PowerState) -> bool {
        let changed = self.state != state;
        self.state = state;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_switched_off() {
        let device = Device::new(DeviceKind::Light);
        assert!(!device.is_on());
        assert_eq!(device.state(), PowerState::Off);
    }

    #[test]
    fn should_report_change_only_on_transition() {
        let mut device = Device::new(DeviceKind::Speaker);
        assert!(device.set_state(PowerState::On));
        assert!(!device.set_state(PowerState::On));
        assert!(device.is_on());
        assert!(device.set_state(PowerState::Off));
        assert!(!device.is_on());
    }

    #[test]
    fn should_parse_builtin_kinds_case_insensitively() {
        assert_eq!("Light".parse::<DeviceKind>().unwrap(), DeviceKind::Light);
        assert_eq!("ac".parse::<DeviceKind>().unwrap(), DeviceKind::AirConditioner);
        assert_eq!(
            "air_conditioner".parse::<DeviceKind>().unwrap(),
            DeviceKind::AirConditioner
        );
        assert_eq!(" SPEAKER ".parse::<DeviceKind>().unwrap(), DeviceKind::Speaker);
    }

    #[test]
    fn should_keep_unknown_kind_as_other() {
        let kind: DeviceKind = "Heater".parse().unwrap();
        assert_eq!(kind, DeviceKind::Other("Heater".to_string()));
        assert_eq!(kind.to_string(), "Heater");
        assert_eq!(kind.noun(), "heater");
    }

    #[test]
    fn should_reject_blank_kind() {
        assert_eq!(
            "   ".parse::<DeviceKind>(),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn should_display_short_labels() {
        assert_eq!(DeviceKind::AirConditioner.to_string(), "AC");
        assert_eq!(DeviceKind::AirConditioner.noun(), "air conditioner");
    }

    #[test]
    fn should_serialize_kind_as_label() {
        let json = serde_json::to_string(&DeviceKind::AirConditioner).unwrap();
        assert_eq!(json, "\"AC\"");
        let parsed: DeviceKind = serde_json::from_str("\"Speaker\"").unwrap();
        assert_eq!(parsed, DeviceKind::Speaker);
    }

    #[test]
    fn should_display_lowercase_power_state() {
        assert_eq!(PowerState::On.to_string(), "on");
        assert_eq!(PowerState::Off.to_string(), "off");
        assert_eq!(PowerState::default(), PowerState::Off);
    }
}
