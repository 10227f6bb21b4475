//! Client for the NS (Dutch railways) open-data API.
//!
//! Fetches station lists, live departures, disruptions, trip plans and
//! fares, and returns them as typed records.

pub mod api;
pub mod domain;
pub mod render;
