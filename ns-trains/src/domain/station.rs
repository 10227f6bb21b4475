//! Station records.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::keyed::RecordKey;

/// Country code of Dutch stations.
pub const DUTCH_COUNTRY: &str = "NL";

/// A station from the station list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub name: String,
    /// Short station code, e.g. "UT" for Utrecht Centraal.
    pub code: String,
    pub lat: f64,
    pub long: f64,
    /// Country code, e.g. "NL" or "D".
    pub country: String,
    /// Whether this entry is an alternative name for another station.
    pub alias: bool,
}

impl Station {
    /// Returns true for stations in the Netherlands.
    pub fn is_dutch(&self) -> bool {
        self.country == DUTCH_COUNTRY
    }
}

/// Error returned when parsing an unknown station key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station key: {0} (expected name, code, lat or long)")]
pub struct InvalidStationKey(String);

/// Field used to index a station list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationKey {
    Name,
    Code,
    Lat,
    Long,
}

impl StationKey {
    /// Lenient lookup: unknown names yield `None`, meaning "no key".
    ///
    /// ```
    /// use ns_trains::domain::StationKey;
    ///
    /// assert_eq!(StationKey::from_name("code"), Some(StationKey::Code));
    /// assert_eq!(StationKey::from_name("country"), None);
    /// ```
    pub fn from_name(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StationKey::Name => "name",
            StationKey::Code => "code",
            StationKey::Lat => "lat",
            StationKey::Long => "long",
        }
    }
}

impl FromStr for StationKey {
    type Err = InvalidStationKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(StationKey::Name),
            "code" => Ok(StationKey::Code),
            "lat" => Ok(StationKey::Lat),
            "long" => Ok(StationKey::Long),
            other => Err(InvalidStationKey(other.to_string())),
        }
    }
}

impl fmt::Display for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RecordKey<Station> for StationKey {
    fn key_of(&self, station: &Station) -> String {
        match self {
            StationKey::Name => station.name.clone(),
            StationKey::Code => station.code.clone(),
            StationKey::Lat => station.lat.to_string(),
            StationKey::Long => station.long.to_string(),
        }
    }
}
