//! NS API client.
//!
//! This module provides an HTTP client for the NS (Dutch railways) open-data
//! API, which serves station lists, live departures, disruptions, trip plans
//! and fares as XML.
//!
//! Key characteristics of the API:
//! - Authentication is HTTP basic auth on every request
//! - Timestamps carry a colon-less UTC offset (`2012-02-27T15:32:00+0100`)
//! - Elements are routinely omitted rather than sent empty, so every DTO
//!   field is optional and requiredness is checked during conversion

mod client;
mod convert;
mod endpoint;
mod error;
mod query;
mod types;

pub use client::{
    BASE_URL_VAR, DisruptionOptions, NsClient, NsConfig, PASSWORD_VAR, TripOptions, USERNAME_VAR,
    basic_auth_value, decode_xml,
};
pub use convert::{
    ConversionError, DecodeMode, convert_departures, convert_disruptions, convert_prices,
    convert_stations, convert_trips,
};
pub use endpoint::Endpoint;
pub use error::NsError;
pub use query::Query;
pub use types::{
    DepartureDto, DeparturesResponse, DisruptionDto, DisruptionGroup, DisruptionsResponse,
    PlatformDto, PriceDto, PricesResponse, ProductDto, StationDto, StationsResponse, StopDto,
    TripDto, TripPartDto, TripsResponse,
};
