//! Fixture-backed client for working without network access.
//!
//! Loads a station list and per-station predictions from JSON files in the
//! same shapes the live API returns, and serves them as if they were live
//! responses.
//!
//! Directory layout:
//!
//! ```text
//! <dir>/stations.json           # metadata API response
//! <dir>/predictions/<id>.json   # data getter response, one per station
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Station, StationId, TidePredictionWindow};
use crate::source::StationSource;

use super::convert::{convert_stations, convert_window};
use super::error::FetchError;
use super::types::{PredictionsResponse, StationsResponse};

/// Client that serves stations and predictions from JSON files.
#[derive(Debug, Clone)]
pub struct FixtureClient {
    stations: Arc<Vec<Station>>,
    predictions: Arc<HashMap<StationId, TidePredictionWindow>>,
}

impl FixtureClient {
    /// Load fixtures from a directory.
    ///
    /// `stations.json` is required; the `predictions` directory is optional.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let dir = dir.as_ref();

        let stations_path = dir.join("stations.json");
        let json = std::fs::read_to_string(&stations_path).map_err(|e| FetchError::Fixture {
            message: format!("failed to read {:?}: {}", stations_path, e),
        })?;
        let response: StationsResponse =
            serde_json::from_str(&json).map_err(|e| FetchError::Fixture {
                message: format!("failed to parse {:?}: {}", stations_path, e),
            })?;
        let stations = convert_stations(response.stations);

        let mut predictions = HashMap::new();
        let predictions_dir = dir.join("predictions");
        if predictions_dir.is_dir() {
            let entries = std::fs::read_dir(&predictions_dir).map_err(|e| FetchError::Fixture {
                message: format!("failed to read {:?}: {}", predictions_dir, e),
            })?;

            for entry in entries {
                let entry = entry.map_err(|e| FetchError::Fixture {
                    message: format!("failed to read directory entry: {}", e),
                })?;

                let path = entry.path();
                if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }

                // "8443970.json" -> "8443970"
                let id = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| StationId::parse(s).ok())
                    .ok_or_else(|| FetchError::Fixture {
                        message: format!("invalid station id in filename: {:?}", path),
                    })?;

                let json = std::fs::read_to_string(&path).map_err(|e| FetchError::Fixture {
                    message: format!("failed to read {:?}: {}", path, e),
                })?;
                let response: PredictionsResponse =
                    serde_json::from_str(&json).map_err(|e| FetchError::Fixture {
                        message: format!("failed to parse {:?}: {}", path, e),
                    })?;
                let window = convert_window(&response.predictions.unwrap_or_default())
                    .map_err(|e| FetchError::Fixture {
                        message: format!("failed to convert {:?}: {}", path, e),
                    })?;

                predictions.insert(id, window);
            }
        }

        debug!(
            stations = stations.len(),
            prediction_files = predictions.len(),
            "loaded fixtures"
        );

        Ok(Self {
            stations: Arc::new(stations),
            predictions: Arc::new(predictions),
        })
    }

    /// Stations that have a predictions fixture.
    pub fn stations_with_predictions(&self) -> Vec<StationId> {
        let mut ids: Vec<StationId> = self.predictions.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl StationSource for FixtureClient {
    async fn fetch_all_stations(&self) -> Result<Vec<Station>, FetchError> {
        Ok(self.stations.as_ref().clone())
    }

    /// The window is static; `hours` is ignored.
    async fn fetch_prediction_window(
        &self,
        station: &StationId,
        _hours: u32,
    ) -> Result<TidePredictionWindow, FetchError> {
        self.predictions
            .get(station)
            .cloned()
            .ok_or_else(|| FetchError::Api {
                status: 404,
                message: format!("no prediction fixture for station {}", station),
            })
    }
}
