//! Live departure records.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::keyed::RecordKey;

/// A train departing from a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Departure {
    /// Scheduled departure time.
    pub departure: DateTime<FixedOffset>,
    /// Service (ride) number.
    pub service: String,
    pub destination: String,
    /// Train type, e.g. "Sprinter" or "Intercity".
    pub train_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Whether the departure platform differs from the planned one.
    pub platform_changed: bool,
    /// Intermediate routing, empty when the train runs direct.
    pub via: String,
    /// Delay in whole minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    /// Human-readable delay, e.g. "+5 min".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_text: Option<String>,
    /// Operating company, e.g. "NS" or "Arriva".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_tip: Option<String>,
    pub remarks: Vec<String>,
}

/// Error returned when parsing an unknown departure key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown departure key: {0} (expected service, destination, platform or type)")]
pub struct InvalidDepartureKey(String);

/// Field used to index a departure list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureKey {
    Service,
    Destination,
    Platform,
    Type,
}

impl DepartureKey {
    /// Lenient lookup: unknown names yield `None`, meaning "no key".
    pub fn from_name(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl FromStr for DepartureKey {
    type Err = InvalidDepartureKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "service" => Ok(DepartureKey::Service),
            "destination" => Ok(DepartureKey::Destination),
            "platform" => Ok(DepartureKey::Platform),
            "type" => Ok(DepartureKey::Type),
            other => Err(InvalidDepartureKey(other.to_string())),
        }
    }
}

impl RecordKey<Departure> for DepartureKey {
    fn key_of(&self, departure: &Departure) -> String {
        match self {
            DepartureKey::Service => departure.service.clone(),
            DepartureKey::Destination => departure.destination.clone(),
            DepartureKey::Platform => departure.platform.clone().unwrap_or_default(),
            DepartureKey::Type => departure.train_type.clone(),
        }
    }
}
