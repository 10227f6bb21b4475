//! Upstream endpoint names.

use std::fmt;

/// One NS API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Stations,
    Disruptions,
    Departures,
    Trips,
    Prices,
}

impl Endpoint {
    /// Path appended to the base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Stations => "ns-api-stations",
            Endpoint::Disruptions => "ns-api-storingen",
            Endpoint::Departures => "ns-api-avt",
            Endpoint::Trips => "ns-api-treinplanner",
            Endpoint::Prices => "ns-api-prijzen-v2",
        }
    }

    /// Expected root element of the response.
    pub fn root(&self) -> &'static str {
        match self {
            Endpoint::Stations => "stations",
            Endpoint::Disruptions => "Storingen",
            Endpoint::Departures => "ActueleVertrekTijden",
            Endpoint::Trips => "ReisMogelijkheden",
            Endpoint::Prices => "Producten",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
