//! Observable prediction state.

use crate::domain::{StationId, TidePredictionWindow};

/// Snapshot of the prediction coordinator, published after every transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionState {
    /// The most recently selected station, if any.
    pub station: Option<StationId>,

    /// Predictions for `station`. Empty until a fetch succeeds, and after
    /// one fails.
    pub window: TidePredictionWindow,

    /// True while the fetch for `station` is outstanding.
    pub loading: bool,
}

impl PredictionState {
    pub fn new() -> Self {
        Self::default()
    }
}
