//! Observable search state.

use crate::cache::StationCache;
use crate::domain::Station;

/// Which work the search coordinator is currently waiting on.
///
/// When several operations overlap, the one closest to producing results
/// wins: a running filter outranks a cache fetch, which outranks a pending
/// debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// Fetching the full station list for the first time.
    AwaitingCache,
    /// Waiting out the quiet period before filtering.
    Debouncing,
    /// Filtering the cached stations.
    Filtering,
}

/// Snapshot of the search coordinator, published after every transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Current query text.
    pub query: String,

    /// Every known station. Empty until the first successful fetch.
    pub stations: StationCache,

    /// Stations matching the query, from the most recent completed filter.
    pub filtered: Vec<Station>,

    /// True once a filter has been running longer than the activity delay.
    pub show_activity: bool,

    /// Reserved for server-side search. Always false.
    pub search_locally: bool,

    pub phase: SearchPhase,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a query has been entered but no stations are known.
    ///
    /// Presentation can treat this as "the station list could not be loaded".
    pub fn is_missing_stations(&self) -> bool {
        !self.query.is_empty()
            && self.stations.is_empty()
            && self.phase != SearchPhase::AwaitingCache
    }
}
