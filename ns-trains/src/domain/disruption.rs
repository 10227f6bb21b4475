//! Service disruption records.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Whether a disruption was announced in advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisruptionType {
    /// Engineering works and other announced changes.
    Planned,
    /// Failures, accidents and other live incidents.
    Unplanned,
}

impl DisruptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisruptionType::Planned => "planned",
            DisruptionType::Unplanned => "unplanned",
        }
    }
}

impl fmt::Display for DisruptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planned or unplanned disruption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disruption {
    pub id: String,
    /// Affected route segment, e.g. "Utrecht Centraal-Amersfoort".
    pub applicable: Option<String>,
    pub period: Option<String>,
    /// Alternative travel advice.
    pub alternative: Option<String>,
    pub reason: Option<String>,
    pub delay: Option<String>,
    pub message: Option<String>,
    /// When the disruption was reported.
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(rename = "type")]
    pub kind: DisruptionType,
}
