//! Prediction state transitions.

use tracing::{debug, trace, warn};

use crate::domain::{StationId, TidePredictionWindow};
use crate::noaa::FetchError;
use crate::ops::{Generations, OpKind, Ticket};

use super::config::PredictionConfig;
use super::state::PredictionState;

/// Inputs to the prediction state machine.
#[derive(Debug)]
pub enum PredictionAction {
    /// The selected station changed. `None` means nothing is selected.
    StationChanged(Option<StationId>),

    /// A window fetch finished.
    WindowLoaded {
        ticket: Ticket,
        station: StationId,
        result: Result<TidePredictionWindow, FetchError>,
    },
}

/// Work the runner must start.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionEffect {
    /// Fetch `hours` of predictions for `station`, superseding any earlier
    /// fetch, and answer with `WindowLoaded`.
    FetchWindow {
        ticket: Ticket,
        station: StationId,
        hours: u32,
    },
}

/// The prediction coordinator's deterministic core.
#[derive(Debug)]
pub struct PredictionMachine {
    config: PredictionConfig,
    state: PredictionState,
    ops: Generations,
}

impl PredictionMachine {
    pub fn new(config: PredictionConfig) -> Self {
        Self {
            config,
            state: PredictionState::new(),
            ops: Generations::new(),
        }
    }

    pub fn state(&self) -> &PredictionState {
        &self.state
    }

    /// Apply one action, returning the effects it schedules.
    pub fn handle(&mut self, action: PredictionAction) -> Vec<PredictionEffect> {
        match action {
            PredictionAction::StationChanged(None) => {
                // Deselecting keeps whatever is on screen
                trace!("station cleared; predictions left as they are");
                Vec::new()
            }
            PredictionAction::StationChanged(Some(station)) => {
                let ticket = self.ops.issue(OpKind::PredictionFetch);
                debug!(
                    %station,
                    generation = ticket.generation(),
                    "fetching prediction window"
                );

                self.state.station = Some(station.clone());
                self.state.loading = true;

                vec![PredictionEffect::FetchWindow {
                    ticket,
                    station,
                    hours: self.config.lookahead_hours,
                }]
            }
            PredictionAction::WindowLoaded {
                ticket,
                station,
                result,
            } => {
                if let Err(notice) = self.ops.settle(ticket) {
                    trace!(%notice, %station, "dropping stale prediction window");
                    return Vec::new();
                }

                self.state.loading = false;
                self.state.window = match result {
                    Ok(window) => {
                        debug!(%station, predictions = window.len(), "prediction window replaced");
                        window
                    }
                    Err(error) => {
                        warn!(%station, %error, "prediction fetch failed");
                        TidePredictionWindow::empty()
                    }
                };

                Vec::new()
            }
        }
    }
}
