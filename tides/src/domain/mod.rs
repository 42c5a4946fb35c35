//! Domain types for tide stations and predictions.
//!
//! Types here are validated at construction time and are immutable once
//! fetched; coordinators replace them wholesale rather than editing them.

mod prediction;
mod station;

pub use prediction::{TidePrediction, TidePredictionWindow, TideType};
pub use station::{InvalidStationId, Station, StationId};
