//! Station search.
//!
//! Turns free-text input into a filtered station list:
//! - the full station list is fetched once, on the first non-empty query
//! - filtering waits for a quiet period after the last keystroke (debounce)
//! - filtering is a local substring match against the cached list
//! - an activity indicator appears only if a filter runs longer than a delay
//!
//! Overlapping timers and fetches are reconciled with per-kind generation
//! tickets (see [`crate::ops`]), so a superseded operation can never
//! overwrite newer results.

mod config;
mod coordinator;
mod filter;
mod machine;
mod state;

pub use config::{MatchCase, SearchConfig};
pub use coordinator::SearchCoordinator;
pub use filter::matching_stations;
pub use machine::{SearchAction, SearchEffect, SearchMachine};
pub use state::{SearchPhase, SearchState};
