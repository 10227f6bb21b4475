//! Domain records for the NS API.
//!
//! These are the validated, typed shapes returned by the client. Raw XML
//! DTOs live in `api`; everything here has already been checked and
//! normalized.

mod departure;
mod disruption;
mod keyed;
mod price;
mod station;
mod time;
mod trip;

pub use departure::{Departure, DepartureKey, InvalidDepartureKey};
pub use disruption::{Disruption, DisruptionType};
pub use keyed::{Keyed, Listing, RecordKey};
pub use price::{Discount, FareClass, Price, parse_amount_cents};
pub use station::{DUTCH_COUNTRY, InvalidStationKey, Station, StationKey};
pub use time::{
    TimeError, format_date_time, parse_date_time, parse_delay_minutes, parse_hours_minutes,
};
pub use trip::{Connection, Notice, Stop, Trip};
