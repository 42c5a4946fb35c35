//! Wires the search and prediction coordinators together.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::domain::Station;
use crate::predictions::{PredictionConfig, PredictionCoordinator, PredictionState};
use crate::search::{SearchConfig, SearchCoordinator, SearchState};
use crate::source::StationSource;

/// Configuration for both coordinators.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub predictions: PredictionConfig,
}

/// Owns the selected station.
///
/// Stations picked through search become the selection and their
/// predictions are fetched. Clearing the selection leaves the last
/// predictions in place.
pub struct TidesApp {
    search: SearchCoordinator,
    predictions: PredictionCoordinator,
    selected: Arc<watch::Sender<Option<Station>>>,
    forwarder: AbortHandle,
}

impl TidesApp {
    /// Start both coordinators over one shared source.
    pub fn spawn<S: StationSource>(source: Arc<S>, config: AppConfig) -> Self {
        let search = SearchCoordinator::spawn(Arc::clone(&source), config.search);
        let predictions = PredictionCoordinator::spawn(source, config.predictions);
        let (selected, _) = watch::channel(None);
        let selected = Arc::new(selected);

        let mut selections = search.selections();
        let forward_to = predictions.clone();
        let forward_selected = Arc::clone(&selected);
        let forwarder = tokio::spawn(async move {
            loop {
                match selections.recv().await {
                    Ok(selection) => {
                        debug!(station = ?selection.as_ref().map(|s| &s.id), "selection changed");
                        forward_to.station_changed(selection.as_ref().map(|s| s.id.clone()));
                        forward_selected.send_replace(selection);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "selection forwarding fell behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
        .abort_handle();

        Self {
            search,
            predictions,
            selected,
            forwarder,
        }
    }

    pub fn search(&self) -> &SearchCoordinator {
        &self.search
    }

    pub fn predictions(&self) -> &PredictionCoordinator {
        &self.predictions
    }

    pub fn query_changed(&self, text: impl Into<String>) {
        self.search.query_changed(text);
    }

    pub fn select_station(&self, station: Station) {
        self.search.select_station(station);
    }

    /// Drop the current selection, after any selection already made.
    pub fn clear_selection(&self) {
        self.search.clear_selection();
    }

    pub fn selected(&self) -> Option<Station> {
        self.selected.borrow().clone()
    }

    pub fn subscribe_selected(&self) -> watch::Receiver<Option<Station>> {
        self.selected.subscribe()
    }

    pub fn search_state(&self) -> SearchState {
        self.search.state()
    }

    pub fn prediction_state(&self) -> PredictionState {
        self.predictions.state()
    }
}

impl Drop for TidesApp {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}
