//! Conversion from NS API DTOs to domain records.
//!
//! Each record is converted on its own so that a bad entry can either fail
//! the whole response or be skipped, depending on the [`DecodeMode`].

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::domain::{
    Connection, Departure, Discount, Disruption, DisruptionType, FareClass, Notice, Price, Station,
    Stop, Trip, parse_amount_cents, parse_date_time, parse_delay_minutes, parse_hours_minutes,
};

use super::types::{
    DepartureDto, DeparturesResponse, DisruptionDto, DisruptionsResponse, NoticeDto, PlatformDto,
    PricesResponse, StationDto, StationsResponse, StopDto, TripDto, TripPartDto, TripsResponse,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a timestamp
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Failed to parse an H:MM travel time
    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("invalid number in {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// Boolean field other than "true" or "false"
    #[error("invalid flag in {field}: {value}")]
    InvalidFlag { field: &'static str, value: String },

    #[error("invalid fare class: {0}")]
    InvalidFareClass(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// How to treat records that fail conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Fail the whole response on the first invalid record.
    #[default]
    Strict,
    /// Log and drop invalid records, keeping the rest.
    SkipInvalid,
}

/// Convert a sequence of DTOs, honouring the decode mode.
fn convert_all<D, T>(
    items: impl IntoIterator<Item = D>,
    mode: DecodeMode,
    what: &'static str,
    convert: impl Fn(D) -> Result<T, ConversionError>,
) -> Result<Vec<T>, ConversionError> {
    let mut out = Vec::new();
    for item in items {
        match convert(item) {
            Ok(record) => out.push(record),
            Err(e) if mode == DecodeMode::SkipInvalid => {
                warn!(record = what, error = %e, "skipping invalid record");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

/// Trim a text field, mapping blank values to `None`.
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConversionError> {
    text(value).ok_or(ConversionError::MissingField(field))
}

fn timestamp(value: &str) -> Result<DateTime<FixedOffset>, ConversionError> {
    parse_date_time(value).map_err(|_| ConversionError::InvalidTimestamp(value.to_string()))
}

fn required_timestamp(
    value: Option<String>,
    field: &'static str,
) -> Result<DateTime<FixedOffset>, ConversionError> {
    timestamp(&required(value, field)?)
}

fn optional_timestamp(
    value: Option<String>,
) -> Result<Option<DateTime<FixedOffset>>, ConversionError> {
    text(value).map(|v| timestamp(&v)).transpose()
}

fn duration(value: &str) -> Result<u32, ConversionError> {
    parse_hours_minutes(value).map_err(|_| ConversionError::InvalidDuration(value.to_string()))
}

fn flag(value: &str, field: &'static str) -> Result<bool, ConversionError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ConversionError::InvalidFlag {
            field,
            value: other.to_string(),
        }),
    }
}

/// Platform text and whether it was changed.
///
/// Only an explicit `wijziging="true"` counts as a change.
fn platform(dto: Option<PlatformDto>) -> (Option<String>, bool) {
    match dto {
        Some(p) => {
            let changed = p.changed.as_deref().map(str::trim) == Some("true");
            (text(Some(p.value)), changed)
        }
        None => (None, false),
    }
}

/// Convert a station list response.
pub fn convert_stations(
    response: StationsResponse,
    mode: DecodeMode,
) -> Result<Vec<Station>, ConversionError> {
    convert_all(response.stations, mode, "station", convert_station)
}

pub fn convert_station(dto: StationDto) -> Result<Station, ConversionError> {
    let coordinate = |value: Option<String>, field: &'static str| -> Result<f64, ConversionError> {
        let value = required(value, field)?;
        value
            .parse::<f64>()
            .map_err(|_| ConversionError::InvalidNumber { field, value })
    };

    Ok(Station {
        name: required(dto.name, "name")?,
        code: required(dto.code, "code")?,
        lat: coordinate(dto.lat, "lat")?,
        long: coordinate(dto.long, "long")?,
        country: required(dto.country, "country")?,
        alias: match text(dto.alias) {
            Some(v) => flag(&v, "alias")?,
            None => false,
        },
    })
}

/// Convert a disruptions response: planned entries, then unplanned.
pub fn convert_disruptions(
    response: DisruptionsResponse,
    mode: DecodeMode,
) -> Result<Vec<Disruption>, ConversionError> {
    let planned = response.planned.map(|g| g.entries).unwrap_or_default();
    let unplanned = response.unplanned.map(|g| g.entries).unwrap_or_default();

    let tagged = planned
        .into_iter()
        .map(|d| (d, DisruptionType::Planned))
        .chain(unplanned.into_iter().map(|d| (d, DisruptionType::Unplanned)));

    convert_all(tagged, mode, "disruption", |(dto, kind)| {
        convert_disruption(dto, kind)
    })
}

pub fn convert_disruption(
    dto: DisruptionDto,
    kind: DisruptionType,
) -> Result<Disruption, ConversionError> {
    Ok(Disruption {
        id: required(dto.id, "id")?,
        applicable: text(dto.route),
        period: text(dto.period),
        alternative: text(dto.advice),
        reason: text(dto.reason),
        delay: text(dto.delay),
        message: text(dto.message),
        date: optional_timestamp(dto.date)?,
        kind,
    })
}

/// Convert a departure board response.
pub fn convert_departures(
    response: DeparturesResponse,
    mode: DecodeMode,
) -> Result<Vec<Departure>, ConversionError> {
    convert_all(response.trains, mode, "departure", convert_departure)
}

pub fn convert_departure(dto: DepartureDto) -> Result<Departure, ConversionError> {
    let (platform, platform_changed) = platform(dto.platform);

    Ok(Departure {
        departure: required_timestamp(dto.departure, "VertrekTijd")?,
        service: required(dto.service, "RitNummer")?,
        destination: required(dto.destination, "EindBestemming")?,
        train_type: required(dto.train_type, "TreinSoort")?,
        platform,
        platform_changed,
        via: text(dto.route_text).unwrap_or_default(),
        delay: text(dto.delay).and_then(|d| parse_delay_minutes(&d)),
        delay_text: text(dto.delay_text),
        carrier: text(dto.carrier),
        travel_tip: text(dto.travel_tip),
        remarks: dto
            .remarks
            .map(|r| r.items.into_iter().filter_map(|s| text(Some(s))).collect())
            .unwrap_or_default(),
    })
}

/// Convert a trip planner response.
pub fn convert_trips(
    response: TripsResponse,
    mode: DecodeMode,
) -> Result<Vec<Trip>, ConversionError> {
    convert_all(response.options, mode, "trip", convert_trip)
}

pub fn convert_trip(dto: TripDto) -> Result<Trip, ConversionError> {
    let changes = required(dto.changes, "AantalOverstappen")?;
    let changes = changes
        .parse::<u32>()
        .map_err(|_| ConversionError::InvalidNumber {
            field: "AantalOverstappen",
            value: changes,
        })?;

    let notices = dto
        .notices
        .into_iter()
        .map(convert_notice)
        .collect::<Result<Vec<_>, _>>()?;

    let connections = dto
        .parts
        .into_iter()
        .map(convert_connection)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Trip {
        duration_scheduled: duration(&required(dto.duration_scheduled, "GeplandeReisTijd")?)?,
        duration_actual: text(dto.duration_actual)
            .map(|d| duration(&d))
            .transpose()?,
        optimal: flag(&required(dto.optimal, "Optimaal")?, "Optimaal")?,
        departure_scheduled: required_timestamp(dto.departure_scheduled, "GeplandeVertrekTijd")?,
        departure_actual: optional_timestamp(dto.departure_actual)?,
        arrival_scheduled: required_timestamp(dto.arrival_scheduled, "GeplandeAankomstTijd")?,
        arrival_actual: optional_timestamp(dto.arrival_actual)?,
        changes,
        status: text(dto.status),
        notices,
        connections,
    })
}

fn convert_notice(dto: NoticeDto) -> Result<Notice, ConversionError> {
    Ok(Notice {
        id: text(dto.id),
        serious: match text(dto.serious) {
            Some(v) => flag(&v, "Ernstig")?,
            None => false,
        },
        text: text(dto.text).unwrap_or_default(),
    })
}

fn convert_connection(dto: TripPartDto) -> Result<Connection, ConversionError> {
    let stops = dto
        .stops
        .into_iter()
        .map(convert_stop)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Connection {
        mode: required(dto.mode, "reisSoort")?.to_lowercase(),
        vehicle_type: required(dto.vehicle_type, "VervoerType")?,
        service: text(dto.service),
        carrier: text(dto.carrier),
        status: text(dto.status),
        stops,
    })
}

fn convert_stop(dto: StopDto) -> Result<Stop, ConversionError> {
    let (platform, platform_changed) = platform(dto.platform);

    Ok(Stop {
        station: required(dto.name, "Naam")?,
        time: required_timestamp(dto.time, "Tijd")?,
        platform,
        platform_changed,
    })
}

/// Convert a fares response into one price per product, class and discount.
pub fn convert_prices(
    response: PricesResponse,
    mode: DecodeMode,
) -> Result<Vec<Price>, ConversionError> {
    let mut out = Vec::new();
    for product in response.products {
        let name = match required(product.name, "naam") {
            Ok(name) => name,
            Err(e) if mode == DecodeMode::SkipInvalid => {
                warn!(record = "product", error = %e, "skipping invalid record");
                continue;
            }
            Err(e) => return Err(e),
        };

        let prices = convert_all(product.prices, mode, "price", |dto| {
            let class = required(dto.class, "klasse")?;
            let class = FareClass::parse(&class).ok_or(ConversionError::InvalidFareClass(class))?;
            let amount = dto.amount.trim();
            let amount_cents = parse_amount_cents(amount)
                .ok_or_else(|| ConversionError::InvalidAmount(amount.to_string()))?;

            let code = text(dto.discount).unwrap_or_default();
            let discount = Discount::from_code_strict(&code).unwrap_or_else(|| {
                warn!(code = %code, "unrecognized discount code, assuming 20%");
                Discount::from_code(&code)
            });

            Ok(Price {
                product: name.clone(),
                class,
                discount,
                amount_cents,
            })
        })?;
        out.extend(prices);
    }
    Ok(out)
}
