//! NOAA tide station search and prediction coordination.
//!
//! Search narrows the full list of tide-prediction stations as the user
//! types, fetching that list once and filtering it after a quiet period.
//! Selecting a station loads its upcoming high and low tides. Both
//! coordinators run as tokio tasks and publish snapshots over watch channels.

pub mod app;
pub mod cache;
pub mod domain;
pub mod noaa;
pub mod ops;
pub mod predictions;
pub mod search;
pub mod source;

#[cfg(test)]
mod testing;
