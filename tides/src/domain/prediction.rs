//! Tide prediction types.

use std::fmt;

use chrono::{DateTime, Utc};

/// Whether a predicted extremum is a high or a low tide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TideType {
    High,
    Low,
}

impl TideType {
    /// Parse the NOAA `hilo` tag (`H`, `L`, and the `HH`/`LL` higher-high and
    /// lower-low variants).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "H" | "HH" => Some(TideType::High),
            "L" | "LL" => Some(TideType::Low),
            _ => None,
        }
    }
}

impl fmt::Display for TideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TideType::High => f.pad("high"),
            TideType::Low => f.pad("low"),
        }
    }
}

/// A single predicted tide extremum.
#[derive(Debug, Clone, PartialEq)]
pub struct TidePrediction {
    pub time: DateTime<Utc>,

    /// Water level relative to the configured datum.
    pub value: f64,

    pub tide_type: TideType,
}

impl TidePrediction {
    pub fn new(time: DateTime<Utc>, value: f64, tide_type: TideType) -> Self {
        Self {
            time,
            value,
            tide_type,
        }
    }
}

/// Predictions for one station over a lookahead window.
///
/// Always ordered by timestamp ascending; constructors sort their input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TidePredictionWindow {
    predictions: Vec<TidePrediction>,
}

impl TidePredictionWindow {
    /// Create a window from predictions in any order.
    pub fn new(mut predictions: Vec<TidePrediction>) -> Self {
        predictions.sort_by_key(|p| p.time);
        Self { predictions }
    }

    /// An empty window.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn predictions(&self) -> &[TidePrediction] {
        &self.predictions
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// The next prediction at or after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<&TidePrediction> {
        // Sorted, so the partition point is the first prediction not before now
        let idx = self.predictions.partition_point(|p| p.time < now);
        self.predictions.get(idx)
    }
}
