//! Async runner for the search state machine.
//!
//! One task owns the [`SearchMachine`] and applies actions from a single
//! queue. Timers, filters and fetches run as separate tasks whose results are
//! sent back onto that queue, so state is only ever touched by the owning
//! task and needs no locking.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::debug;

use crate::domain::Station;
use crate::ops::{OpKind, TaskSet};
use crate::source::StationSource;

use super::config::SearchConfig;
use super::filter::matching_stations;
use super::machine::{SearchAction, SearchEffect, SearchMachine};
use super::state::SearchState;

/// Buffered selections per subscriber before older ones are dropped.
const SELECTION_CAPACITY: usize = 16;

/// Handle to a running search coordinator.
///
/// Cheap to clone. The coordinator stops once every handle is dropped.
#[derive(Clone)]
pub struct SearchCoordinator {
    intents: mpsc::UnboundedSender<SearchAction>,
    state: watch::Receiver<SearchState>,
    selections: broadcast::Sender<Option<Station>>,
}

impl SearchCoordinator {
    /// Start a coordinator on the current tokio runtime.
    pub fn spawn<S: StationSource>(source: Arc<S>, config: SearchConfig) -> Self {
        let (intents_tx, intents_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::new());
        let (selections_tx, _) = broadcast::channel(SELECTION_CAPACITY);

        let runner = SearchRunner {
            machine: SearchMachine::new(config),
            source,
            tasks: TaskSet::new(),
            completions: completions_tx,
            state: state_tx,
            selections: selections_tx.clone(),
        };
        tokio::spawn(runner.run(intents_rx, completions_rx));

        Self {
            intents: intents_tx,
            state: state_rx,
            selections: selections_tx,
        }
    }

    /// The user edited the query text.
    pub fn query_changed(&self, text: impl Into<String>) {
        self.send(SearchAction::QueryChanged(text.into()));
    }

    /// The user picked a station. Forwarded to [`Self::selections`]
    /// subscribers; search state is unaffected.
    pub fn select_station(&self, station: Station) {
        self.send(SearchAction::StationSelected(station));
    }

    /// The user dropped the selection. Ordered with [`Self::select_station`],
    /// so subscribers see `None` after any selection made before it.
    pub fn clear_selection(&self) {
        self.send(SearchAction::SelectionCleared);
    }

    /// Latest published state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    /// Receive selection changes; `None` when the selection is cleared.
    pub fn selections(&self) -> broadcast::Receiver<Option<Station>> {
        self.selections.subscribe()
    }

    fn send(&self, action: SearchAction) {
        if self.intents.send(action).is_err() {
            debug!("search coordinator has stopped; intent ignored");
        }
    }
}

struct SearchRunner<S> {
    machine: SearchMachine,
    source: Arc<S>,
    tasks: TaskSet,
    completions: mpsc::UnboundedSender<SearchAction>,
    state: watch::Sender<SearchState>,
    selections: broadcast::Sender<Option<Station>>,
}

impl<S: StationSource> SearchRunner<S> {
    async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<SearchAction>,
        mut completions: mpsc::UnboundedReceiver<SearchAction>,
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
            self.publish();
            for effect in effects {
                self.execute(effect);
            }
        }

        debug!("search coordinator stopped");
    }

    fn publish(&self) {
        let next = self.machine.state();
        self.state.send_if_modified(|current| {
            if *current == *next {
                return false;
            }
            *current = next.clone();
            true
        });
    }

    fn execute(&mut self, effect: SearchEffect) {
        let tx = self.completions.clone();

        match effect {
            SearchEffect::FetchStations(ticket) => {
                let source = Arc::clone(&self.source);
                self.tasks.spawn(OpKind::StationFetch, async move {
                    let result = source.fetch_all_stations().await;
                    let _ = tx.send(SearchAction::StationsLoaded { ticket, result });
                });
            }
            SearchEffect::StartDebounce { ticket, delay } => {
                self.tasks.spawn(OpKind::Debounce, async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(SearchAction::DebounceElapsed(ticket));
                });
            }
            SearchEffect::RunFilter {
                ticket,
                query,
                stations,
                match_case,
            } => {
                self.tasks.spawn(OpKind::Filter, async move {
                    let results = matching_stations(&stations, &query, match_case);
                    let _ = tx.send(SearchAction::FilterCompleted { ticket, results });
                });
            }
            SearchEffect::StartActivityDelay { ticket, delay } => {
                self.tasks.spawn(OpKind::ActivityIndicator, async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(SearchAction::ActivityDelayElapsed(ticket));
                });
            }
            SearchEffect::Cancel(kind) => self.tasks.abort(kind),
            SearchEffect::NotifySelected(selection) => {
                // No subscribers is fine
                let _ = self.selections.send(selection);
            }
        }
    }
}
