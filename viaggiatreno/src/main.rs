use std::process::ExitCode;

use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use viaggiatreno::api::{ClientConfig, ViaggiaTrenoClient};
use viaggiatreno::domain::TrainType;

const USAGE: &str = "\
Usage: viaggiatreno <command> [args]

Commands:
  search <train-number>                 Find a train and its origin station
  stations <partial-name>               Autocomplete station names
  status <station-code> <train>         Current train status
  stops <station-code> <train>          Stop-by-stop progress
  departures <station-code> [time]      Departure board (default: now)
  arrivals <station-code> [time]        Arrival board (default: now)
  segments [types] [unix-seconds]       List route segments
  segment <section> [types]             Route segment details

Types are comma separated, from ES*,IC,EXP,EC,EN (default: all).

Environment:
  VIAGGIATRENO_BASE_URL      Override the service base URL
  VIAGGIATRENO_TIMEOUT_SECS  Request timeout in seconds
  RUST_LOG                   Log filter (default: warn)";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config = ClientConfig::new();
    if let Ok(url) = std::env::var("VIAGGIATRENO_BASE_URL") {
        config = config.with_base_url(url);
    }
    if let Ok(secs) = std::env::var("VIAGGIATRENO_TIMEOUT_SECS") {
        match secs.parse() {
            Ok(secs) => config = config.with_timeout(secs),
            Err(_) => eprintln!("Warning: ignoring invalid VIAGGIATRENO_TIMEOUT_SECS={secs}"),
        }
    }

    let client = match ViaggiaTrenoClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create client: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, &args).await {
        Ok(Some(value)) => {
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{text}"),
                Err(e) => eprintln!("Failed to render result: {e}"),
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("No result (see RUST_LOG=debug for details)");
            ExitCode::from(1)
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(2)
        }
    }
}

async fn run(client: &ViaggiaTrenoClient, args: &[String]) -> Result<Option<Value>, String> {
    let arg = |i: usize| {
        args.get(i)
            .map(String::as_str)
            .ok_or_else(|| USAGE.to_string())
    };
    let types = |i: usize| -> Vec<String> {
        match args.get(i) {
            Some(list) => list.split(',').map(str::to_string).collect(),
            None => TrainType::ALL.iter().map(|t| t.code().to_string()).collect(),
        }
    };
    let time = |i: usize| args.get(i).cloned().unwrap_or_else(|| "now".to_string());

    let result = match arg(0)? {
        "search" => to_json(client.search_train_and_station(arg(1)?).await),
        "stations" => to_json(client.autocomplete_station(arg(1)?).await),
        "status" => client.train_status(arg(1)?, arg(2)?).await,
        "stops" => client.train_stops(arg(1)?, arg(2)?).await,
        "departures" => client
            .departures(arg(1)?, time(2))
            .await
            .map_err(|e| e.to_string())?,
        "arrivals" => client
            .arrivals(arg(1)?, time(2))
            .await
            .map_err(|e| e.to_string())?,
        "segments" => {
            let timestamp = args
                .get(2)
                .map(|s| s.parse::<i64>())
                .transpose()
                .map_err(|e| format!("invalid timestamp: {e}"))?;
            client.list_route_segments(types(1), timestamp).await
        }
        "segment" => client.route_segment_details(arg(1)?, types(2)).await,
        "help" | "--help" | "-h" => return Err(USAGE.to_string()),
        other => return Err(format!("unknown command {other:?}\n\n{USAGE}")),
    };

    Ok(result)
}

fn to_json<T: Serialize>(value: Option<T>) -> Option<Value> {
    value.and_then(|v| serde_json::to_value(v).ok())
}
