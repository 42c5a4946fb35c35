use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use tides::app::{AppConfig, TidesApp};
use tides::domain::Station;
use tides::noaa::{FixtureClient, NoaaClient, NoaaConfig};
use tides::predictions::PredictionState;
use tides::search::{SearchPhase, SearchState};
use tides::source::StationSource;

/// Results listed per search snapshot.
const MAX_LISTED: usize = 10;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tides=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let outcome = match std::env::var("TIDES_FIXTURE_DIR") {
        Ok(dir) => match FixtureClient::new(&dir) {
            Ok(client) => {
                tracing::info!(
                    %dir,
                    with_predictions = client.stations_with_predictions().len(),
                    "serving stations from fixtures"
                );
                run(Arc::new(client)).await
            }
            Err(e) => Err(e.to_string()),
        },
        Err(_) => match NoaaClient::new(noaa_config()) {
            Ok(client) => run(Arc::new(client)).await,
            Err(e) => Err(e.to_string()),
        },
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn noaa_config() -> NoaaConfig {
    let mut config = NoaaConfig::default();
    if let Ok(url) = std::env::var("NOAA_STATIONS_URL") {
        config = config.with_stations_url(url);
    }
    if let Ok(url) = std::env::var("NOAA_DATA_URL") {
        config = config.with_data_url(url);
    }
    if let Ok(application) = std::env::var("NOAA_APPLICATION") {
        config = config.with_application(application);
    }
    config
}

/// One line of terminal input.
#[derive(Debug, PartialEq)]
enum Command {
    Query(String),
    Select(usize),
    Clear,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let mut words = command.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("quit" | "q"), None, None) => Command::Quit,
            (Some("clear"), None, None) => Command::Clear,
            (Some("select"), Some(n), None) => match n.parse() {
                Ok(n) if n > 0 => Command::Select(n),
                _ => Command::Unknown(format!("not a result number: {n}")),
            },
            _ => Command::Unknown(format!("unknown command: {line}")),
        }
    }
}

async fn run<S: StationSource>(source: Arc<S>) -> Result<(), String> {
    let app = TidesApp::spawn(source, AppConfig::default());
    let mut search = app.search().subscribe();
    let mut predictions = app.predictions().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type to search stations by name or state code.");
    println!("  :select N   show predictions for result N");
    println!("  :clear      clear the selection");
    println!("  :quit       exit");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(|e| e.to_string())? else {
                    break;
                };
                match Command::parse(&line) {
                    Command::Query(text) => app.query_changed(text),
                    Command::Select(n) => match app.search_state().filtered.get(n - 1) {
                        Some(station) => app.select_station(station.clone()),
                        None => println!("No result #{n}"),
                    },
                    Command::Clear => {
                        app.clear_selection();
                        println!("Selection cleared");
                    }
                    Command::Quit => break,
                    Command::Unknown(message) => println!("{message}"),
                }
            }
            Ok(()) = search.changed() => {
                let state = search.borrow_and_update().clone();
                print_search(&state);
            }
            Ok(()) = predictions.changed() => {
                let state = predictions.borrow_and_update().clone();
                print_predictions(&state, app.selected().as_ref());
            }
        }
    }

    Ok(())
}

fn print_search(state: &SearchState) {
    if state.query.is_empty() {
        return;
    }
    match state.phase {
        SearchPhase::AwaitingCache => println!("Loading stations..."),
        SearchPhase::Debouncing => {}
        SearchPhase::Filtering if state.show_activity => println!("Searching..."),
        SearchPhase::Filtering => {}
        SearchPhase::Idle if state.is_missing_stations() => {
            println!("Station list unavailable; type again to retry")
        }
        SearchPhase::Idle => {
            println!("{} match(es) for {:?}", state.filtered.len(), state.query);
            for (i, station) in state.filtered.iter().take(MAX_LISTED).enumerate() {
                println!("  {:>2}. {station}", i + 1);
            }
            if state.filtered.len() > MAX_LISTED {
                println!("  ... {} more", state.filtered.len() - MAX_LISTED);
            }
        }
    }
}

fn print_predictions(state: &PredictionState, selected: Option<&Station>) {
    let Some(station) = &state.station else {
        return;
    };
    let label = selected
        .filter(|s| &s.id == station)
        .map_or_else(|| station.to_string(), Station::to_string);

    if state.loading {
        println!("Loading predictions for {label}...");
        return;
    }
    if state.window.is_empty() {
        println!("No predictions available for {label}");
        return;
    }

    let next = state.window.next_after(Utc::now()).map(|p| p.time);

    println!("Predictions for {label}:");
    for prediction in state.window.predictions() {
        let marker = if Some(prediction.time) == next { ">" } else { " " };
        println!(
            " {marker} {}  {:<4}  {:>6.2}",
            prediction.time.format("%a %d %b %H:%M UTC"),
            prediction.tide_type,
            prediction.value,
        );
    }
}
