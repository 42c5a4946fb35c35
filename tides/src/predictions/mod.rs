//! Tide predictions for the selected station.
//!
//! Each selection starts a fetch of the next few days of high and low tides.
//! Selecting again supersedes the previous fetch: its task is aborted and,
//! should its result already be queued, the stale generation is dropped.

mod config;
mod coordinator;
mod machine;
mod state;

pub use config::PredictionConfig;
pub use coordinator::PredictionCoordinator;
pub use machine::{PredictionAction, PredictionEffect, PredictionMachine};
pub use state::PredictionState;
