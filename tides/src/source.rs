//! Remote data source consumed by the coordinators.

use std::future::Future;

use crate::domain::{Station, StationId, TidePredictionWindow};
use crate::noaa::FetchError;

/// Where stations and predictions come from.
///
/// This abstraction allows the coordinators to be tested with scripted
/// sources. Both calls are single-shot: no retries happen at this layer.
pub trait StationSource: Send + Sync + 'static {
    /// Fetch the full station list.
    fn fetch_all_stations(
        &self,
    ) -> impl Future<Output = Result<Vec<Station>, FetchError>> + Send;

    /// Fetch predictions for `station` covering the next `hours`.
    fn fetch_prediction_window(
        &self,
        station: &StationId,
        hours: u32,
    ) -> impl Future<Output = Result<TidePredictionWindow, FetchError>> + Send;
}
