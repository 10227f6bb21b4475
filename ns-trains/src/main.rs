use std::process::ExitCode;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use ns_trains::api::{DisruptionOptions, NsClient, NsConfig, NsError, TripOptions};
use ns_trains::domain::parse_date_time;
use ns_trains::render;

/// Query the NS travel information services.
///
/// Credentials are read from NS_API_USERNAME and NS_API_PASSWORD.
#[derive(Debug, Parser)]
#[command(name = "ns-trains")]
struct Cli {
    /// Print records as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Live departures from a station
    Departures { station: String },
    /// Current disruptions, planned first
    Disruptions { station: Option<String> },
    /// Station list
    Stations {
        /// Only stations in the Netherlands
        #[arg(long)]
        nl: bool,
    },
    /// Travel options between two stations
    Trips {
        from: String,
        to: String,
        /// Departure time, e.g. 2024-05-01T09:00:00+02:00
        #[arg(value_parser = parse_date_time)]
        date_time: Option<DateTime<FixedOffset>>,
    },
    /// Fares between two stations
    Prices {
        from: String,
        to: String,
        via: Option<String>,
    },
}

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            eprintln!(
                "invalid {}, falling back to level '{}' - {}",
                EnvFilter::DEFAULT_ENV,
                default_level,
                err,
            );
        }
        EnvFilter::new(default_level.to_string())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print records either as JSON or as rendered text lines.
fn output<T: Serialize>(json: bool, records: &T, lines: impl IntoIterator<Item = String>) {
    if json {
        match serde_json::to_string_pretty(records) {
            Ok(s) => println!("{s}"),
            Err(e) => error!("failed to serialize output: {e}"),
        }
    } else {
        for line in lines {
            println!("{line}");
        }
    }
}

async fn run(client: &NsClient, command: Command, json: bool) -> Result<(), NsError> {
    match command {
        Command::Departures { station } => {
            let departures = client.departures(&station, None).await?.into_vec();
            output(json, &departures, departures.iter().map(render::departure_line));
        }
        Command::Disruptions { station } => {
            let options = DisruptionOptions {
                station,
                actual: Some(true),
                unplanned: None,
            };
            let disruptions = client.disruptions(&options).await?;
            output(json, &disruptions, disruptions.iter().map(render::disruption_line));
        }
        Command::Stations { nl } => {
            let stations = client.stations(None, nl).await?.into_vec();
            output(json, &stations, stations.iter().map(render::station_line));
        }
        Command::Trips { from, to, date_time } => {
            let options = TripOptions {
                date_time,
                departure: date_time.map(|_| true),
                ..Default::default()
            };
            let trips = client.trips(&from, &to, &options).await?;
            output(json, &trips, trips.iter().flat_map(render::trip_lines));
        }
        Command::Prices { from, to, via } => {
            let prices = client.prices(&from, &to, via.as_deref()).await?;
            output(json, &prices, prices.iter().map(render::price_line));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger();

    let config = match NsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match NsClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create NS client: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli.command, cli.json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
