//! NS API response DTOs.
//!
//! These types map directly to the XML documents served by the API. Every
//! field is optional here: the API drops elements freely, and required
//! fields are enforced during conversion so that errors can name them.

use serde::Deserialize;

/// `<error>` document returned for rejected requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
}

/// Response from `ns-api-stations`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsResponse {
    #[serde(rename = "station", default)]
    pub stations: Vec<StationDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub name: Option<String>,
    pub code: Option<String>,
    pub country: Option<String>,
    pub lat: Option<String>,
    pub long: Option<String>,
    pub alias: Option<String>,
}

/// Response from `ns-api-storingen`.
#[derive(Debug, Clone, Deserialize)]
pub struct DisruptionsResponse {
    #[serde(rename = "Gepland")]
    pub planned: Option<DisruptionGroup>,

    #[serde(rename = "Ongepland")]
    pub unplanned: Option<DisruptionGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisruptionGroup {
    #[serde(rename = "Storing", default)]
    pub entries: Vec<DisruptionDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisruptionDto {
    pub id: Option<String>,

    #[serde(rename = "Traject")]
    pub route: Option<String>,

    #[serde(rename = "Periode")]
    pub period: Option<String>,

    #[serde(rename = "Advies")]
    pub advice: Option<String>,

    #[serde(rename = "Reden")]
    pub reason: Option<String>,

    #[serde(rename = "Vertraging")]
    pub delay: Option<String>,

    #[serde(rename = "Bericht")]
    pub message: Option<String>,

    #[serde(rename = "Datum")]
    pub date: Option<String>,
}

/// Response from `ns-api-avt`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeparturesResponse {
    #[serde(rename = "VertrekkendeTrein", default)]
    pub trains: Vec<DepartureDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartureDto {
    #[serde(rename = "RitNummer")]
    pub service: Option<String>,

    #[serde(rename = "VertrekTijd")]
    pub departure: Option<String>,

    /// ISO 8601 duration, e.g. "PT5M".
    #[serde(rename = "VertrekVertraging")]
    pub delay: Option<String>,

    #[serde(rename = "VertrekVertragingTekst")]
    pub delay_text: Option<String>,

    #[serde(rename = "EindBestemming")]
    pub destination: Option<String>,

    #[serde(rename = "TreinSoort")]
    pub train_type: Option<String>,

    #[serde(rename = "RouteTekst")]
    pub route_text: Option<String>,

    #[serde(rename = "Vervoerder")]
    pub carrier: Option<String>,

    #[serde(rename = "VertrekSpoor")]
    pub platform: Option<PlatformDto>,

    #[serde(rename = "ReisTip")]
    pub travel_tip: Option<String>,

    #[serde(rename = "Opmerkingen")]
    pub remarks: Option<RemarksDto>,
}

/// A platform element, with its change indicator attribute.
///
/// `<VertrekSpoor wijziging="true">5b</VertrekSpoor>`
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDto {
    #[serde(rename = "@wijziging")]
    pub changed: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemarksDto {
    #[serde(rename = "Opmerking", default)]
    pub items: Vec<String>,
}

/// Response from `ns-api-treinplanner`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripsResponse {
    #[serde(rename = "ReisMogelijkheid", default)]
    pub options: Vec<TripDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripDto {
    #[serde(rename = "Melding", default)]
    pub notices: Vec<NoticeDto>,

    #[serde(rename = "AantalOverstappen")]
    pub changes: Option<String>,

    /// Travel time as "H:MM".
    #[serde(rename = "GeplandeReisTijd")]
    pub duration_scheduled: Option<String>,

    #[serde(rename = "ActueleReisTijd")]
    pub duration_actual: Option<String>,

    #[serde(rename = "Optimaal")]
    pub optimal: Option<String>,

    #[serde(rename = "GeplandeVertrekTijd")]
    pub departure_scheduled: Option<String>,

    #[serde(rename = "ActueleVertrekTijd")]
    pub departure_actual: Option<String>,

    #[serde(rename = "GeplandeAankomstTijd")]
    pub arrival_scheduled: Option<String>,

    #[serde(rename = "ActueleAankomstTijd")]
    pub arrival_actual: Option<String>,

    #[serde(rename = "Status")]
    pub status: Option<String>,

    #[serde(rename = "ReisDeel", default)]
    pub parts: Vec<TripPartDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoticeDto {
    #[serde(rename = "Id")]
    pub id: Option<String>,

    #[serde(rename = "Ernstig")]
    pub serious: Option<String>,

    #[serde(rename = "Text")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripPartDto {
    /// Travel mode, e.g. "TRAIN".
    #[serde(rename = "@reisSoort")]
    pub mode: Option<String>,

    #[serde(rename = "Vervoerder")]
    pub carrier: Option<String>,

    #[serde(rename = "VervoerType")]
    pub vehicle_type: Option<String>,

    #[serde(rename = "RitNummer")]
    pub service: Option<String>,

    #[serde(rename = "Status")]
    pub status: Option<String>,

    #[serde(rename = "ReisStop", default)]
    pub stops: Vec<StopDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    #[serde(rename = "Naam")]
    pub name: Option<String>,

    #[serde(rename = "Tijd")]
    pub time: Option<String>,

    #[serde(rename = "Spoor")]
    pub platform: Option<PlatformDto>,
}

/// Response from `ns-api-prijzen-v2`.
#[derive(Debug, Clone, Deserialize)]
pub struct PricesResponse {
    #[serde(rename = "Product", default)]
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductDto {
    #[serde(rename = "@naam")]
    pub name: Option<String>,

    #[serde(rename = "Prijs", default)]
    pub prices: Vec<PriceDto>,
}

/// `<Prijs korting="reductie_20" klasse="2">5,00</Prijs>`
#[derive(Debug, Clone, Deserialize)]
pub struct PriceDto {
    #[serde(rename = "@korting")]
    pub discount: Option<String>,

    #[serde(rename = "@klasse")]
    pub class: Option<String>,

    #[serde(rename = "$text", default)]
    pub amount: String,
}
