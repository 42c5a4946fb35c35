//! NOAA API response DTOs.
//!
//! These map directly onto the JSON returned by the metadata API
//! (`stations.json`) and the data getter (`product=predictions`). NOAA sends
//! most numbers as strings in the data getter and omits or nulls fields
//! freely, hence the liberal use of `Option` and `default`.

use serde::{Deserialize, Serialize};

/// Response from `mdapi/.../stations.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationsResponse {
    #[serde(default)]
    pub count: Option<u32>,

    pub stations: Vec<StationDto>,
}

/// A station as listed by the metadata API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationDto {
    pub id: String,

    pub name: String,

    /// Absent or null for stations outside US states.
    #[serde(default)]
    pub state: Option<String>,

    pub lat: f64,

    pub lng: f64,
}

/// Response from the data getter with `product=predictions`.
///
/// On a bad request NOAA still answers 200, with `error` set instead of
/// `predictions`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionsResponse {
    #[serde(default)]
    pub predictions: Option<Vec<PredictionDto>>,

    #[serde(default)]
    pub error: Option<ApiErrorDto>,
}

/// A single `hilo` prediction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionDto {
    /// Timestamp as `yyyy-MM-dd HH:mm`.
    pub t: String,

    /// Water level as a decimal string.
    pub v: String,

    /// `H` or `L`.
    #[serde(rename = "type")]
    pub tide_type: String,
}

/// Error object embedded in an otherwise successful response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorDto {
    pub message: String,
}
