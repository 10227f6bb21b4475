//! NS API HTTP client.
//!
//! Each public method issues exactly one authenticated GET request, decodes
//! the XML body and converts it into domain records.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset};
use quick_xml::events::Event;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{
    Departure, DepartureKey, Disruption, Listing, Price, Station, StationKey, Trip,
};

use super::convert::{
    DecodeMode, convert_departures, convert_disruptions, convert_prices, convert_stations,
    convert_trips,
};
use super::endpoint::Endpoint;
use super::error::NsError;
use super::query::Query;
use super::types::{
    DeparturesResponse, DisruptionsResponse, ErrorResponse, PricesResponse, StationsResponse,
    TripsResponse,
};

/// Default base URL for the NS API. Only plain HTTP is used.
const DEFAULT_BASE_URL: &str = "http://webservices.ns.nl";

/// Environment variable holding the API username.
pub const USERNAME_VAR: &str = "NS_API_USERNAME";
/// Environment variable holding the API password.
pub const PASSWORD_VAR: &str = "NS_API_PASSWORD";
/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "NS_API_BASE_URL";

/// Number of body characters kept in decode errors.
const ERROR_BODY_CHARS: usize = 500;

/// Configuration for the NS client.
#[derive(Clone)]
pub struct NsConfig {
    /// API username (usually an e-mail address)
    pub username: String,
    /// API password
    pub password: String,
    /// Base URL for the API (defaults to the production service)
    pub base_url: String,
    /// Request timeout in seconds, if any
    pub timeout_secs: Option<u64>,
    /// What to do with records that fail conversion
    pub decode_mode: DecodeMode,
}

impl NsConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            decode_mode: DecodeMode::default(),
        }
    }

    /// Read credentials (and optionally the base URL) from the environment.
    pub fn from_env() -> Result<Self, NsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NsError> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let username =
            var(USERNAME_VAR).ok_or_else(|| NsError::NotConfigured(format!("{USERNAME_VAR} not set")))?;
        let password =
            var(PASSWORD_VAR).ok_or_else(|| NsError::NotConfigured(format!("{PASSWORD_VAR} not set")))?;

        let config = Self::new(username, password);
        Ok(match var(BASE_URL_VAR) {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set how invalid records are handled.
    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }
}

impl std::fmt::Debug for NsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("decode_mode", &self.decode_mode)
            .finish()
    }
}

/// Value of the `Authorization` header for basic authentication.
pub fn basic_auth_value(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Options for [`NsClient::disruptions`].
#[derive(Debug, Clone, Default)]
pub struct DisruptionOptions {
    /// Only disruptions affecting this station
    pub station: Option<String>,
    /// Include current disruptions
    pub actual: Option<bool>,
    /// Include planned engineering works
    pub unplanned: Option<bool>,
}

impl DisruptionOptions {
    fn query(&self) -> Query {
        Query::new()
            .opt_param("station", self.station.as_deref())
            .flag("actual", self.actual)
            .flag("unplanned", self.unplanned)
    }
}

/// Options for [`NsClient::trips`].
#[derive(Debug, Clone, Default)]
pub struct TripOptions {
    /// Station to travel via
    pub via: Option<String>,
    /// Number of earlier options to list (at most 5)
    pub previous_advices: Option<u32>,
    /// Number of later options to list (at most 5)
    pub next_advices: Option<u32>,
    /// Departure or arrival time, see `departure`
    pub date_time: Option<DateTime<FixedOffset>>,
    /// Whether `date_time` is a departure (true) or arrival (false) time
    pub departure: Option<bool>,
    /// Allow high-speed trains
    pub hsl_allowed: Option<bool>,
    /// Assume free travel with a year card
    pub year_card: Option<bool>,
}

impl TripOptions {
    fn query(&self, from: &str, to: &str) -> Query {
        Query::new()
            .param("fromStation", from)
            .param("toStation", to)
            .opt_param("viaStation", self.via.as_deref())
            .number("previousAdvices", self.previous_advices)
            .number("nextAdvices", self.next_advices)
            .date_time("dateTime", self.date_time.as_ref())
            .flag("departure", self.departure)
            .flag("hslAllowed", self.hsl_allowed)
            .flag("yearCard", self.year_card)
    }
}

/// NS API client.
///
/// Holds the HTTP client with credentials installed and nothing else; it can
/// be reused for any number of sequential calls.
#[derive(Debug, Clone)]
pub struct NsClient {
    http: reqwest::Client,
    base_url: String,
    decode_mode: DecodeMode,
}

impl NsClient {
    /// Create a new NS client with the given configuration.
    pub fn new(config: NsConfig) -> Result<Self, NsError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&basic_auth_value(&config.username, &config.password))
            .map_err(|_| NsError::InvalidCredentials)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(0);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url,
            decode_mode: config.decode_mode,
        })
    }

    /// Build the full request URL for an endpoint.
    pub fn url(&self, endpoint: Endpoint, query: &Query) -> Result<Url, NsError> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path());
        let mut url = Url::parse(&raw).map_err(|e| NsError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    /// List stations, optionally keyed and limited to the Netherlands.
    pub async fn stations(
        &self,
        key: Option<StationKey>,
        dutch_only: bool,
    ) -> Result<Listing<Station>, NsError> {
        let response: StationsResponse = self.fetch_xml(Endpoint::Stations, &Query::new()).await?;
        let mut stations = convert_stations(response, self.decode_mode)?;
        if dutch_only {
            stations.retain(Station::is_dutch);
        }
        Ok(Listing::new(stations, key))
    }

    /// List current disruptions, planned ones first.
    pub async fn disruptions(
        &self,
        options: &DisruptionOptions,
    ) -> Result<Vec<Disruption>, NsError> {
        let response: DisruptionsResponse = self
            .fetch_xml(Endpoint::Disruptions, &options.query())
            .await?;
        Ok(convert_disruptions(response, self.decode_mode)?)
    }

    /// List live departures from a station.
    pub async fn departures(
        &self,
        station: &str,
        key: Option<DepartureKey>,
    ) -> Result<Listing<Departure>, NsError> {
        let query = Query::new().param("station", station);
        let response: DeparturesResponse = self.fetch_xml(Endpoint::Departures, &query).await?;
        let departures = convert_departures(response, self.decode_mode)?;
        Ok(Listing::new(departures, key))
    }

    /// Plan trips between two stations.
    pub async fn trips(
        &self,
        from: &str,
        to: &str,
        options: &TripOptions,
    ) -> Result<Vec<Trip>, NsError> {
        let response: TripsResponse = self
            .fetch_xml(Endpoint::Trips, &options.query(from, to))
            .await?;
        Ok(convert_trips(response, self.decode_mode)?)
    }

    /// List fares between two stations, optionally via a third.
    pub async fn prices(
        &self,
        from: &str,
        to: &str,
        via: Option<&str>,
    ) -> Result<Vec<Price>, NsError> {
        let query = Query::new()
            .param("from", from)
            .param("to", to)
            .opt_param("via", via);
        let response: PricesResponse = self.fetch_xml(Endpoint::Prices, &query).await?;
        Ok(convert_prices(response, self.decode_mode)?)
    }

    /// Fetch an endpoint and decode its XML body.
    async fn fetch_xml<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &Query,
    ) -> Result<T, NsError> {
        let body = self.fetch(endpoint, query).await?;
        decode_xml(endpoint, &body)
    }

    /// Fetch the raw response body of an endpoint.
    pub async fn fetch(&self, endpoint: Endpoint, query: &Query) -> Result<String, NsError> {
        let url = self.url(endpoint, query)?;
        debug!(%endpoint, %url, "requesting");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(NsError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(%endpoint, bytes = body.len(), "response received");
        Ok(body)
    }
}

/// Name of the first element in an XML document.
fn root_element(xml: &str) -> Option<String> {
    let mut reader = quick_xml::Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

/// Check the document root and decode the body into `T`.
///
/// An empty or whitespace-only body is an error, never an empty result.
pub fn decode_xml<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T, NsError> {
    if body.trim().is_empty() {
        return Err(NsError::EmptyBody {
            endpoint: endpoint.path(),
        });
    }

    let xml_error = |e: quick_xml::DeError| NsError::Xml {
        message: e.to_string(),
        body: Some(body.chars().take(ERROR_BODY_CHARS).collect()),
    };

    match root_element(body) {
        Some(root) if root == "error" => {
            let error: ErrorResponse = quick_xml::de::from_str(body).map_err(xml_error)?;
            return Err(NsError::Upstream {
                message: error.message.unwrap_or_default().trim().to_string(),
            });
        }
        Some(root) if root != endpoint.root() => {
            return Err(NsError::UnexpectedRoot {
                expected: endpoint.root(),
                found: root,
            });
        }
        Some(_) => {}
        None => {
            return Err(NsError::Xml {
                message: "no root element".to_string(),
                body: Some(body.chars().take(ERROR_BODY_CHARS).collect()),
            });
        }
    }

    quick_xml::de::from_str(body).map_err(xml_error)
}
