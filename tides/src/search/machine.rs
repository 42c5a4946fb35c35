//! Search state transitions.
//!
//! [`SearchMachine::handle`] maps an action onto the state and returns the
//! effects to execute. It performs no I/O and never sleeps, so every timing
//! rule can be tested by feeding it actions by hand; the async runner in
//! `coordinator.rs` turns effects into tasks and tasks back into actions.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::domain::Station;
use crate::noaa::FetchError;
use crate::ops::{Generations, OpKind, Ticket};

use super::config::{MatchCase, SearchConfig};
use super::state::{SearchPhase, SearchState};

/// Inputs to the search state machine.
#[derive(Debug)]
pub enum SearchAction {
    /// User edited the query text.
    QueryChanged(String),

    /// User picked a station from the results.
    StationSelected(Station),

    /// User dropped the current selection.
    SelectionCleared,

    /// A debounce timer fired.
    DebounceElapsed(Ticket),

    /// A filter produced its results.
    FilterCompleted {
        ticket: Ticket,
        results: Vec<Station>,
    },

    /// An activity-indicator delay fired.
    ActivityDelayElapsed(Ticket),

    /// The station list fetch finished.
    StationsLoaded {
        ticket: Ticket,
        result: Result<Vec<Station>, FetchError>,
    },
}

/// Work the runner must start or stop.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEffect {
    /// Fetch every station and answer with `StationsLoaded`.
    FetchStations(Ticket),

    /// Sleep, then answer with `DebounceElapsed`.
    StartDebounce { ticket: Ticket, delay: Duration },

    /// Filter `stations` by `query` and answer with `FilterCompleted`.
    RunFilter {
        ticket: Ticket,
        query: String,
        stations: Arc<Vec<Station>>,
        match_case: MatchCase,
    },

    /// Sleep, then answer with `ActivityDelayElapsed`.
    StartActivityDelay { ticket: Ticket, delay: Duration },

    /// Stop the task for this kind, if any.
    Cancel(OpKind),

    /// Tell the composing parent the selection changed. `None` means it was
    /// cleared.
    NotifySelected(Option<Station>),
}

/// The search coordinator's deterministic core.
#[derive(Debug)]
pub struct SearchMachine {
    config: SearchConfig,
    state: SearchState,
    ops: Generations,

    /// A debounce fired while the station fetch was still outstanding; the
    /// filter runs as soon as the fetch completes.
    filter_waiting_on_cache: bool,
}

impl SearchMachine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            state: SearchState::new(),
            ops: Generations::new(),
            filter_waiting_on_cache: false,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Apply one action, returning the effects it schedules.
    pub fn handle(&mut self, action: SearchAction) -> Vec<SearchEffect> {
        let effects = match action {
            SearchAction::QueryChanged(text) => self.query_changed(text),
            SearchAction::StationSelected(station) => {
                debug!(station = %station.id, "station selected");
                vec![SearchEffect::NotifySelected(Some(station))]
            }
            SearchAction::SelectionCleared => {
                debug!("selection cleared");
                vec![SearchEffect::NotifySelected(None)]
            }
            SearchAction::DebounceElapsed(ticket) => self.debounce_elapsed(ticket),
            SearchAction::FilterCompleted { ticket, results } => {
                self.filter_completed(ticket, results)
            }
            SearchAction::ActivityDelayElapsed(ticket) => self.activity_delay_elapsed(ticket),
            SearchAction::StationsLoaded { ticket, result } => {
                self.stations_loaded(ticket, result)
            }
        };

        self.state.phase = self.phase();
        effects
    }

    fn query_changed(&mut self, text: String) -> Vec<SearchEffect> {
        self.state.query = text;

        if self.state.query.is_empty() {
            self.state.filtered.clear();
            self.state.show_activity = false;
            self.filter_waiting_on_cache = false;

            // The station fetch is left running; its result is still wanted
            return [OpKind::Debounce, OpKind::Filter, OpKind::ActivityIndicator]
                .into_iter()
                .map(|kind| {
                    self.ops.cancel(kind);
                    SearchEffect::Cancel(kind)
                })
                .collect();
        }

        let mut effects = Vec::with_capacity(2);

        if self.state.stations.is_empty() && !self.ops.is_outstanding(OpKind::StationFetch) {
            let ticket = self.ops.issue(OpKind::StationFetch);
            debug!(generation = ticket.generation(), "station cache empty, fetching");
            effects.push(SearchEffect::FetchStations(ticket));
        }

        // A fresh quiet period starts now, even if an earlier one already
        // elapsed and is waiting on the cache
        self.filter_waiting_on_cache = false;
        let ticket = self.ops.issue(OpKind::Debounce);
        effects.push(SearchEffect::StartDebounce {
            ticket,
            delay: self.config.debounce,
        });

        effects
    }

    fn debounce_elapsed(&mut self, ticket: Ticket) -> Vec<SearchEffect> {
        if let Err(notice) = self.ops.settle(ticket) {
            trace!(%notice, "dropping stale debounce");
            return Vec::new();
        }

        if self.ops.is_outstanding(OpKind::StationFetch) {
            trace!("debounce elapsed before station list arrived");
            self.filter_waiting_on_cache = true;
            return Vec::new();
        }

        self.run_filter()
    }

    fn run_filter(&mut self) -> Vec<SearchEffect> {
        let filter = self.ops.issue(OpKind::Filter);
        let activity = self.ops.issue(OpKind::ActivityIndicator);

        trace!(query = %self.state.query, generation = filter.generation(), "running filter");

        vec![
            SearchEffect::RunFilter {
                ticket: filter,
                query: self.state.query.clone(),
                stations: self.state.stations.shared(),
                match_case: self.config.match_case,
            },
            SearchEffect::StartActivityDelay {
                ticket: activity,
                delay: self.config.activity_delay,
            },
        ]
    }

    fn filter_completed(&mut self, ticket: Ticket, results: Vec<Station>) -> Vec<SearchEffect> {
        if let Err(notice) = self.ops.settle(ticket) {
            trace!(%notice, "dropping stale filter results");
            return Vec::new();
        }

        debug!(query = %self.state.query, matches = results.len(), "filter completed");

        self.state.filtered = results;
        self.state.show_activity = false;
        self.ops.cancel(OpKind::ActivityIndicator);

        vec![SearchEffect::Cancel(OpKind::ActivityIndicator)]
    }

    fn activity_delay_elapsed(&mut self, ticket: Ticket) -> Vec<SearchEffect> {
        if let Err(notice) = self.ops.settle(ticket) {
            trace!(%notice, "dropping stale activity timer");
            return Vec::new();
        }

        self.state.show_activity = true;
        Vec::new()
    }

    fn stations_loaded(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Station>, FetchError>,
    ) -> Vec<SearchEffect> {
        if let Err(notice) = self.ops.settle(ticket) {
            trace!(%notice, "dropping stale station list");
            return Vec::new();
        }

        match result {
            Ok(stations) => {
                debug!(count = stations.len(), "station cache populated");
                self.state.stations.replace(stations);
            }
            Err(error) => {
                // Cache stays empty; the next non-empty query fetches again
                warn!(%error, "station fetch failed");
            }
        }

        if self.filter_waiting_on_cache {
            self.filter_waiting_on_cache = false;
            return self.run_filter();
        }

        Vec::new()
    }

    fn phase(&self) -> SearchPhase {
        if self.ops.is_outstanding(OpKind::Filter) {
            SearchPhase::Filtering
        } else if self.ops.is_outstanding(OpKind::StationFetch) {
            SearchPhase::AwaitingCache
        } else if self.ops.is_outstanding(OpKind::Debounce) {
            SearchPhase::Debouncing
        } else {
            SearchPhase::Idle
        }
    }
}
