//! Async runner for the prediction state machine.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::domain::StationId;
use crate::ops::{OpKind, TaskSet};
use crate::source::StationSource;

use super::config::PredictionConfig;
use super::machine::{PredictionAction, PredictionEffect, PredictionMachine};
use super::state::PredictionState;

/// Handle to a running prediction coordinator.
///
/// Cheap to clone. The coordinator stops once every handle is dropped.
#[derive(Clone)]
pub struct PredictionCoordinator {
    intents: mpsc::UnboundedSender<PredictionAction>,
    state: watch::Receiver<PredictionState>,
}

impl PredictionCoordinator {
    /// Start a coordinator on the current tokio runtime.
    pub fn spawn<S: StationSource>(source: Arc<S>, config: PredictionConfig) -> Self {
        let (intents_tx, intents_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PredictionState::new());

        let runner = PredictionRunner {
            machine: PredictionMachine::new(config),
            source,
            tasks: TaskSet::new(),
            completions: completions_tx,
            state: state_tx,
        };
        tokio::spawn(runner.run(intents_rx, completions_rx));

        Self {
            intents: intents_tx,
            state: state_rx,
        }
    }

    /// The selected station changed. Any fetch for an earlier station is
    /// abandoned and its result never reaches the state.
    pub fn station_changed(&self, station: Option<StationId>) {
        if self
            .intents
            .send(PredictionAction::StationChanged(station))
            .is_err()
        {
            debug!("prediction coordinator has stopped; intent ignored");
        }
    }

    /// Latest published state.
    pub fn state(&self) -> PredictionState {
        self.state.borrow().clone()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<PredictionState> {
        self.state.clone()
    }
}

struct PredictionRunner<S> {
    machine: PredictionMachine,
    source: Arc<S>,
    tasks: TaskSet,
    completions: mpsc::UnboundedSender<PredictionAction>,
    state: watch::Sender<PredictionState>,
}

impl<S: StationSource> PredictionRunner<S> {
    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<PredictionAction>,
        mut completions: mpsc::UnboundedReceiver<PredictionAction>,
    ) {
        loop {
            let action = tokio::select! {
                Some(action) = completions.recv() => action,
                action = intents.recv() => match action {
                    Some(action) => action,
                    None => break,
                },
            };

            let effects = self.machine.handle(action);
            let next = self.machine.state();
            self.state.send_if_modified(|current| {
                if *current == *next {
                    return false;
                }
                *current = next.clone();
                true
            });

            for effect in effects {
                self.execute(effect);
            }
        }

        debug!("prediction coordinator stopped");
    }

    fn execute(&mut self, effect: PredictionEffect) {
        match effect {
            PredictionEffect::FetchWindow {
                ticket,
                station,
                hours,
            } => {
                let source = Arc::clone(&self.source);
                let tx = self.completions.clone();
                self.tasks.spawn(OpKind::PredictionFetch, async move {
                    let result = source.fetch_prediction_window(&station, hours).await;
                    let _ = tx.send(PredictionAction::WindowLoaded {
                        ticket,
                        station,
                        result,
                    });
                });
            }
        }
    }
}
