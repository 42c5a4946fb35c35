//! NOAA Tides & Currents clients.
//!
//! Two APIs are involved:
//! - the metadata API lists stations (`stations.json?type=tidepredictions`)
//! - the data getter returns predictions (`product=predictions`,
//!   `interval=hilo` for high/low extrema only)
//!
//! Both speak JSON. The data getter reports request errors with a 200 status
//! and an `error` object in the body, so status codes alone are not enough.

mod client;
mod convert;
mod error;
mod fixture;
mod types;

pub use client::{NoaaClient, NoaaConfig};
pub use convert::ConversionError;
pub use error::FetchError;
pub use fixture::FixtureClient;
pub use types::{PredictionDto, PredictionsResponse, StationDto, StationsResponse};
