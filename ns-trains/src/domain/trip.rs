//! Trip planner records.
//!
//! A trip is one travel option between two stations. It is made of
//! connections (one per vehicle or walk), each with its ordered stops.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A travel option returned by the trip planner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    /// Planned travel time in seconds.
    pub duration_scheduled: u32,
    /// Expected travel time in seconds, absent when the trip cannot run.
    pub duration_actual: Option<u32>,
    /// Whether the planner marks this option as the best one.
    pub optimal: bool,
    pub departure_scheduled: DateTime<FixedOffset>,
    pub departure_actual: Option<DateTime<FixedOffset>>,
    pub arrival_scheduled: DateTime<FixedOffset>,
    pub arrival_actual: Option<DateTime<FixedOffset>>,
    /// Number of changes between vehicles.
    pub changes: u32,
    /// Status such as "VOLGENS-PLAN" or "NIET-MOGELIJK".
    pub status: Option<String>,
    pub notices: Vec<Notice>,
    pub connections: Vec<Connection>,
}

impl Trip {
    /// Returns true if any notice is flagged as serious.
    pub fn has_serious_notice(&self) -> bool {
        self.notices.iter().any(|n| n.serious)
    }
}

/// A message attached to a travel option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub id: Option<String>,
    pub serious: bool,
    pub text: String,
}

/// One leg of a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    /// Lower-cased travel mode, e.g. "train".
    pub mode: String,
    /// Vehicle type, e.g. "Intercity".
    #[serde(rename = "type")]
    pub vehicle_type: String,
    /// Service number, absent for walks.
    pub service: Option<String>,
    pub carrier: Option<String>,
    pub status: Option<String>,
    pub stops: Vec<Stop>,
}

/// A stop on a connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub station: String,
    pub time: DateTime<FixedOffset>,
    pub platform: Option<String>,
    pub platform_changed: bool,
}
