//! Test helpers shared by the coordinator suites.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use crate::domain::{Station, StationId, TidePrediction, TidePredictionWindow, TideType};
use crate::noaa::FetchError;
use crate::source::StationSource;

pub fn id(s: &str) -> StationId {
    StationId::parse(s).unwrap()
}

pub fn station(station_id: &str, name: &str, state: &str) -> Station {
    Station::new(id(station_id), name, state, 0.0, 0.0)
}

pub fn boston() -> Station {
    station("1", "Boston", "MA")
}

pub fn portland() -> Station {
    station("2", "Portland", "ME")
}

/// A one-prediction window whose value identifies it in assertions.
pub fn window(value: f64) -> TidePredictionWindow {
    let time = Utc.with_ymd_and_hms(2021, 3, 20, 4, 12, 0).unwrap();
    TidePredictionWindow::new(vec![TidePrediction::new(time, value, TideType::High)])
}

fn scripted_failure() -> FetchError {
    FetchError::Api {
        status: 503,
        message: "scripted failure".to_string(),
    }
}

/// Scripted `StationSource` that counts its calls.
///
/// Station fetches answer from a queue of scripted outcomes, falling back to
/// the default list once the queue is exhausted. Prediction fetches answer
/// per station after a per-station delay; stations without a script fail.
pub struct ScriptedSource {
    stations: Vec<Station>,
    station_script: Mutex<VecDeque<bool>>,
    station_delay: Duration,
    station_calls: Mutex<usize>,
    predictions: HashMap<StationId, (Duration, TidePredictionWindow)>,
    prediction_calls: Mutex<Vec<(StationId, u32)>>,
}

impl ScriptedSource {
    pub fn new(stations: Vec<Station>) -> Self {
        Self {
            stations,
            station_script: Mutex::new(VecDeque::new()),
            station_delay: Duration::ZERO,
            station_calls: Mutex::new(0),
            predictions: HashMap::new(),
            prediction_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_station_delay(mut self, delay: Duration) -> Self {
        self.station_delay = delay;
        self
    }

    /// Make the next station fetch fail. Can be called repeatedly.
    pub fn failing_next(self) -> Self {
        self.station_script.lock().unwrap().push_back(false);
        self
    }

    pub fn with_predictions(
        mut self,
        station: &str,
        delay: Duration,
        window: TidePredictionWindow,
    ) -> Self {
        self.predictions.insert(id(station), (delay, window));
        self
    }

    pub fn station_calls(&self) -> usize {
        *self.station_calls.lock().unwrap()
    }

    pub fn prediction_calls(&self) -> Vec<(StationId, u32)> {
        self.prediction_calls.lock().unwrap().clone()
    }
}

impl StationSource for ScriptedSource {
    async fn fetch_all_stations(&self) -> Result<Vec<Station>, FetchError> {
        *self.station_calls.lock().unwrap() += 1;
        let succeed = self.station_script.lock().unwrap().pop_front().unwrap_or(true);

        tokio::time::sleep(self.station_delay).await;

        if succeed {
            Ok(self.stations.clone())
        } else {
            Err(scripted_failure())
        }
    }

    async fn fetch_prediction_window(
        &self,
        station: &StationId,
        hours: u32,
    ) -> Result<TidePredictionWindow, FetchError> {
        self.prediction_calls
            .lock()
            .unwrap()
            .push((station.clone(), hours));

        match self.predictions.get(station) {
            Some((delay, window)) => {
                tokio::time::sleep(*delay).await;
                Ok(window.clone())
            }
            None => Err(scripted_failure()),
        }
    }
}
