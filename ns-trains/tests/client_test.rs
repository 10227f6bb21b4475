//! End-to-end tests against a fake NS service running on a local port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};

use ns_trains::api::{
    DecodeMode, DisruptionOptions, NsClient, NsConfig, NsError, TripOptions,
};
use ns_trains::domain::{
    DepartureKey, DisruptionType, FareClass, Listing, StationKey, parse_date_time,
};

/// A request as seen by the fake service.
#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    query: Option<String>,
    authorization: Option<String>,
}

/// Canned responses keyed by path, plus a log of requests received.
#[derive(Default)]
struct FakeNs {
    responses: HashMap<&'static str, (StatusCode, String)>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeNs {
    fn with(mut self, path: &'static str, status: StatusCode, body: &str) -> Self {
        self.responses.insert(path, (status, body.to_string()));
        self
    }

    fn ok(self, path: &'static str, body: &str) -> Self {
        self.with(path, StatusCode::OK, body)
    }

    fn last_request(&self) -> Recorded {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request received")
    }
}

async fn respond(
    State(fake): State<Arc<FakeNs>>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, String) {
    fake.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    fake.responses
        .get(uri.path())
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, "not found".to_string()))
}

/// Start the fake service and return a client pointed at it.
async fn start(fake: FakeNs, mode: DecodeMode) -> (NsClient, Arc<FakeNs>) {
    let fake = Arc::new(fake);
    let app = Router::new().fallback(respond).with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = NsConfig::new("user", "pass")
        .with_base_url(format!("http://{addr}"))
        .with_timeout(10)
        .with_decode_mode(mode);
    (NsClient::new(config).unwrap(), fake)
}

const STATIONS: &str = include_str!("fixtures/stations.xml");
const DEPARTURES: &str = include_str!("fixtures/departures.xml");
const DISRUPTIONS: &str = include_str!("fixtures/disruptions.xml");
const TRIPS: &str = include_str!("fixtures/trips.xml");
const PRICES: &str = include_str!("fixtures/prices.xml");

#[tokio::test]
async fn sends_basic_auth_header() {
    let (client, fake) =
        start(FakeNs::default().ok("/ns-api-stations", STATIONS), DecodeMode::Strict).await;

    client.stations(None, false).await.unwrap();

    let request = fake.last_request();
    assert_eq!(request.path, "/ns-api-stations");
    assert_eq!(request.query, None);
    assert_eq!(request.authorization.as_deref(), Some("Basic dXNlcjpwYXNz"));
}

#[tokio::test]
async fn stations_unfiltered_keep_order() {
    let (client, _) =
        start(FakeNs::default().ok("/ns-api-stations", STATIONS), DecodeMode::Strict).await;

    let stations = client.stations(None, false).await.unwrap();
    let Listing::List(stations) = stations else {
        panic!("expected a plain list");
    };
    let codes: Vec<_> = stations.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["UT", "KOLN", "ASD", "ASD", "BRUZ"]);
}

#[tokio::test]
async fn stations_dutch_only() {
    let (client, _) =
        start(FakeNs::default().ok("/ns-api-stations", STATIONS), DecodeMode::Strict).await;

    let stations = client.stations(None, true).await.unwrap().into_vec();
    assert_eq!(stations.len(), 3);
    assert!(stations.iter().all(|s| s.country == "NL"));
}

#[tokio::test]
async fn stations_keyed_by_code_last_write_wins() {
    let (client, _) =
        start(FakeNs::default().ok("/ns-api-stations", STATIONS), DecodeMode::Strict).await;

    let listing = client
        .stations(StationKey::from_name("code"), true)
        .await
        .unwrap();
    let keyed = listing.as_keyed().expect("keyed listing");

    assert_eq!(keyed.keys().collect::<Vec<_>>(), vec!["UT", "ASD"]);
    for (key, station) in keyed.iter() {
        assert_eq!(key, station.code);
    }
    // The alias entry came later in the response and replaced the first
    let asd = keyed.get("ASD").unwrap();
    assert_eq!(asd.name, "Amsterdam CS");
    assert!(asd.alias);
}

#[tokio::test]
async fn stations_invalid_key_name_is_ignored() {
    let (client, _) =
        start(FakeNs::default().ok("/ns-api-stations", STATIONS), DecodeMode::Strict).await;

    let listing = client
        .stations(StationKey::from_name("country"), false)
        .await
        .unwrap();
    assert!(listing.as_keyed().is_none());
    assert_eq!(listing.len(), 5);
}

#[tokio::test]
async fn departures_normalized() {
    let (client, fake) =
        start(FakeNs::default().ok("/ns-api-avt", DEPARTURES), DecodeMode::Strict).await;

    let departures = client
        .departures("Utrecht Centraal", None)
        .await
        .unwrap()
        .into_vec();

    assert_eq!(fake.last_request().query.as_deref(), Some("station=Utrecht+Centraal"));
    assert_eq!(departures.len(), 3);

    let first = &departures[0];
    assert_eq!(
        first.departure,
        parse_date_time("2012-02-27T15:32:00+0100").unwrap()
    );
    assert_eq!(first.via, "Bunnik, Driebergen-Zeist");
    assert_eq!(first.delay, None);
    assert!(!first.platform_changed);

    let second = &departures[1];
    assert_eq!(second.delay, Some(5));
    assert_eq!(second.delay_text.as_deref(), Some("+5 min"));
    assert_eq!(second.platform.as_deref(), Some("5b"));
    assert!(second.platform_changed);
    assert_eq!(second.via, "");
    assert_eq!(second.remarks.len(), 1);

    // PT1H2M does not match the minute pattern
    let third = &departures[2];
    assert_eq!(third.delay, None);
    assert!(!third.platform_changed);
    assert_eq!(third.travel_tip.as_deref(), Some("Stopt niet in Maarn"));
}

#[tokio::test]
async fn departures_keyed_by_service() {
    let (client, _) =
        start(FakeNs::default().ok("/ns-api-avt", DEPARTURES), DecodeMode::Strict).await;

    let listing = client
        .departures("UT", Some(DepartureKey::Service))
        .await
        .unwrap();
    let keyed = listing.as_keyed().unwrap();
    assert_eq!(keyed.get("3531").unwrap().destination, "Schiphol");
    assert_eq!(keyed.keys().collect::<Vec<_>>(), vec!["4987", "3531", "7441"]);
}

#[tokio::test]
async fn disruptions_planned_first() {
    let (client, fake) =
        start(FakeNs::default().ok("/ns-api-storingen", DISRUPTIONS), DecodeMode::Strict).await;

    let options = DisruptionOptions {
        station: None,
        actual: Some(true),
        unplanned: Some(false),
    };
    let disruptions = client.disruptions(&options).await.unwrap();

    assert_eq!(
        fake.last_request().query.as_deref(),
        Some("actual=true&unplanned=false")
    );

    let kinds: Vec<_> = disruptions.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DisruptionType::Planned,
            DisruptionType::Planned,
            DisruptionType::Unplanned
        ]
    );
    assert_eq!(disruptions[0].id, "2010_almo_wp_18_19dec");
    assert_eq!(disruptions[0].delay.as_deref(), Some("30 minuten"));
    assert_eq!(disruptions[2].id, "prio-13345");
    assert!(disruptions[2].message.is_some());
    assert!(disruptions[2].date.is_some());
}

#[tokio::test]
async fn trips_with_connections() {
    let (client, fake) =
        start(FakeNs::default().ok("/ns-api-treinplanner", TRIPS), DecodeMode::Strict).await;

    let options = TripOptions {
        date_time: Some(parse_date_time("2012-02-27T17:00:00+01:00").unwrap()),
        departure: Some(true),
        hsl_allowed: Some(false),
        ..Default::default()
    };
    let trips = client.trips("UT", "ASD", &options).await.unwrap();

    assert_eq!(
        fake.last_request().query.as_deref(),
        Some(
            "fromStation=UT&toStation=ASD&dateTime=2012-02-27T17%3A00%3A00%2B01%3A00\
             &departure=true&hslAllowed=false"
        )
    );

    assert_eq!(trips.len(), 2);

    let direct = &trips[0];
    assert!(direct.optimal);
    assert_eq!(direct.duration_scheduled, 27 * 60);
    assert_eq!(direct.changes, 0);
    assert_eq!(
        direct.arrival_scheduled,
        parse_date_time("2012-02-27T17:45:00+0100").unwrap()
    );
    let stops: Vec<_> = direct.connections[0]
        .stops
        .iter()
        .map(|s| s.station.as_str())
        .collect();
    assert_eq!(
        stops,
        vec!["Utrecht Centraal", "Amsterdam Amstel", "Amsterdam Centraal"]
    );
    assert_eq!(direct.connections[0].stops[1].platform, None);
    assert!(direct.connections[0].stops[2].platform_changed);

    let transfer = &trips[1];
    assert_eq!(transfer.duration_scheduled, 6300);
    assert_eq!(transfer.duration_actual, None);
    assert!(transfer.has_serious_notice());
    assert_eq!(transfer.status.as_deref(), Some("NIET-MOGELIJK"));
    let modes: Vec<_> = transfer.connections.iter().map(|c| c.mode.as_str()).collect();
    assert_eq!(modes, vec!["train", "walk"]);
}

#[tokio::test]
async fn prices_without_via() {
    let (client, fake) =
        start(FakeNs::default().ok("/ns-api-prijzen-v2", PRICES), DecodeMode::Strict).await;

    let prices = client.prices("UT", "ASD", None).await.unwrap();
    assert_eq!(fake.last_request().query.as_deref(), Some("from=UT&to=ASD"));

    assert_eq!(prices.len(), 8);
    assert_eq!(prices[0].product, "Enkele reis");
    assert_eq!(prices[0].class, FareClass::Second);
    assert_eq!(prices[0].discount.percent(), 0);
    assert_eq!(prices[0].amount_cents, 720);
    assert_eq!(prices[2].discount.percent(), 40);
    assert_eq!(prices[3].class, FareClass::First);
    // "kids_vrij" is not a known code
    assert_eq!(prices[7].product, "Dagretour");
    assert_eq!(prices[7].discount.percent(), 20);
}

#[tokio::test]
async fn prices_with_via() {
    let (client, fake) =
        start(FakeNs::default().ok("/ns-api-prijzen-v2", PRICES), DecodeMode::Strict).await;

    client.prices("UT", "ASD", Some("Amersfoort")).await.unwrap();
    assert_eq!(
        fake.last_request().query.as_deref(),
        Some("from=UT&to=ASD&via=Amersfoort")
    );
}

#[tokio::test]
async fn prices_reject_foreign_document() {
    let fake = FakeNs::default().ok(
        "/ns-api-prijzen-v2",
        "<html><body>Service unavailable</body></html>",
    );
    let (client, _) = start(fake, DecodeMode::Strict).await;

    assert!(matches!(
        client.prices("UT", "ASD", None).await,
        Err(NsError::UnexpectedRoot {
            expected: "Producten",
            ..
        })
    ));
}

#[tokio::test]
async fn empty_body_is_failure_for_every_operation() {
    let fake = FakeNs::default()
        .ok("/ns-api-stations", "")
        .ok("/ns-api-storingen", "")
        .ok("/ns-api-avt", "  ")
        .ok("/ns-api-treinplanner", "")
        .ok("/ns-api-prijzen-v2", "\n");
    let (client, _) = start(fake, DecodeMode::Strict).await;

    assert!(matches!(
        client.stations(None, true).await,
        Err(NsError::EmptyBody { .. })
    ));
    assert!(matches!(
        client.disruptions(&DisruptionOptions::default()).await,
        Err(NsError::EmptyBody { .. })
    ));
    assert!(matches!(
        client.departures("UT", None).await,
        Err(NsError::EmptyBody { .. })
    ));
    assert!(matches!(
        client.trips("UT", "ASD", &TripOptions::default()).await,
        Err(NsError::EmptyBody { .. })
    ));
    assert!(matches!(
        client.prices("UT", "ASD", None).await,
        Err(NsError::EmptyBody { .. })
    ));
}

#[tokio::test]
async fn unauthorized_status() {
    let fake = FakeNs::default().with("/ns-api-avt", StatusCode::UNAUTHORIZED, "");
    let (client, _) = start(fake, DecodeMode::Strict).await;

    assert!(matches!(
        client.departures("UT", None).await,
        Err(NsError::Unauthorized)
    ));
}

#[tokio::test]
async fn server_error_status() {
    let fake = FakeNs::default().with("/ns-api-avt", StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let (client, _) = start(fake, DecodeMode::Strict).await;

    match client.departures("UT", None).await {
        Err(NsError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_error_document() {
    let fake = FakeNs::default().ok(
        "/ns-api-avt",
        "<error><message>Station Nergenshuizen bestaat niet</message></error>",
    );
    let (client, _) = start(fake, DecodeMode::Strict).await;

    match client.departures("Nergenshuizen", None).await {
        Err(NsError::Upstream { message }) => {
            assert_eq!(message, "Station Nergenshuizen bestaat niet");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_record_strict_and_lenient() {
    let body = r#"<ActueleVertrekTijden>
        <VertrekkendeTrein>
            <RitNummer>1</RitNummer>
            <VertrekTijd>2012-02-27T15:32:00+0100</VertrekTijd>
            <EindBestemming>Zwolle</EindBestemming>
            <TreinSoort>Intercity</TreinSoort>
        </VertrekkendeTrein>
        <VertrekkendeTrein>
            <RitNummer>2</RitNummer>
            <EindBestemming>Zwolle</EindBestemming>
            <TreinSoort>Intercity</TreinSoort>
        </VertrekkendeTrein>
    </ActueleVertrekTijden>"#;

    let (strict, _) = start(FakeNs::default().ok("/ns-api-avt", body), DecodeMode::Strict).await;
    assert!(matches!(
        strict.departures("ZL", None).await,
        Err(NsError::Conversion(_))
    ));

    let (lenient, _) =
        start(FakeNs::default().ok("/ns-api-avt", body), DecodeMode::SkipInvalid).await;
    let departures = lenient.departures("ZL", None).await.unwrap().into_vec();
    assert_eq!(departures.len(), 1);
    assert_eq!(departures[0].service, "1");
    assert_eq!(departures[0].platform, None);
}

#[tokio::test]
async fn connection_refused_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = NsClient::new(NsConfig::new("user", "pass").with_base_url(format!("http://{addr}")))
        .unwrap();
    assert!(matches!(
        client.stations(None, false).await,
        Err(NsError::Http(_))
    ));
}
