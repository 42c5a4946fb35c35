//! NOAA Tides & Currents HTTP client.

use chrono::Utc;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Station, StationId, TidePredictionWindow};
use crate::source::StationSource;

use super::convert::{convert_stations, convert_window};
use super::error::FetchError;
use super::types::{PredictionsResponse, StationsResponse};

/// Default URL for the station metadata API.
const DEFAULT_STATIONS_URL: &str =
    "https://api.tidesandcurrents.noaa.gov/mdapi/prod/webapi/stations.json";

/// Default URL for the data getter API.
const DEFAULT_DATA_URL: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

/// `begin_date` layout accepted by the data getter.
const BEGIN_DATE_FORMAT: &str = "%Y%m%d %H:%M";

/// How much of an unparseable body to keep in errors.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the NOAA client.
#[derive(Debug, Clone)]
pub struct NoaaConfig {
    /// Station metadata endpoint
    pub stations_url: String,
    /// Data getter endpoint
    pub data_url: String,
    /// Vertical datum for water levels
    pub datum: String,
    /// `english` (feet) or `metric` (meters)
    pub units: String,
    /// Application name NOAA asks clients to identify themselves with
    pub application: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NoaaConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
            datum: "MLLW".to_string(),
            units: "english".to_string(),
            application: "tides".to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom stations URL (for testing).
    pub fn with_stations_url(mut self, url: impl Into<String>) -> Self {
        self.stations_url = url.into();
        self
    }

    /// Set a custom data getter URL (for testing).
    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = url.into();
        self
    }

    /// Set the application name sent with data requests.
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    /// Use metric units.
    pub fn metric(mut self) -> Self {
        self.units = "metric".to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NoaaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// NOAA Tides & Currents API client.
#[derive(Debug, Clone)]
pub struct NoaaClient {
    http: reqwest::Client,
    config: NoaaConfig,
}

impl NoaaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NoaaConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch every tide prediction station.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>, FetchError> {
        let response: StationsResponse = self
            .get_json(&self.config.stations_url, &[("type", "tidepredictions".to_string())])
            .await?;

        debug!(
            reported = response.count,
            received = response.stations.len(),
            "fetched station list"
        );

        Ok(convert_stations(response.stations))
    }

    /// Fetch high/low predictions for `station` over the next `hours`.
    pub async fn fetch_predictions(
        &self,
        station: &StationId,
        hours: u32,
    ) -> Result<TidePredictionWindow, FetchError> {
        let begin = Utc::now().format(BEGIN_DATE_FORMAT).to_string();

        let response: PredictionsResponse = self
            .get_json(
                &self.config.data_url,
                &[
                    ("begin_date", begin),
                    ("range", hours.to_string()),
                    ("station", station.as_str().to_string()),
                    ("product", "predictions".to_string()),
                    ("interval", "hilo".to_string()),
                    ("datum", self.config.datum.clone()),
                    ("units", self.config.units.clone()),
                    ("time_zone", "gmt".to_string()),
                    ("application", self.config.application.clone()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        window_from_response(response)
    }

    /// Issue a GET and decode the JSON body, mapping failures to `FetchError`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        let body = match response.text().await {
            Ok(body) => body,
            Err(error) if !status.is_success() => {
                debug!(%status, %error, "could not read error response body");
                String::new()
            }
            Err(error) => return Err(error.into()),
        };

        decode_response(status, body)
    }
}

/// Map an HTTP status and body to a decoded value or a `FetchError`.
fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: String,
) -> Result<T, FetchError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(FetchError::Unauthorized);
    }

    if !status.is_success() {
        return Err(FetchError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| FetchError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
    })
}

/// Unwrap the data getter's answer, which reports errors inside a 200 body.
fn window_from_response(
    response: PredictionsResponse,
) -> Result<TidePredictionWindow, FetchError> {
    if let Some(error) = response.error {
        return Err(FetchError::Api {
            status: StatusCode::OK.as_u16(),
            message: error.message,
        });
    }

    let predictions = response.predictions.unwrap_or_default();

    convert_window(&predictions).map_err(|e| FetchError::Decode {
        message: e.to_string(),
    })
}

impl StationSource for NoaaClient {
    async fn fetch_all_stations(&self) -> Result<Vec<Station>, FetchError> {
        self.fetch_stations().await
    }

    async fn fetch_prediction_window(
        &self,
        station: &StationId,
        hours: u32,
    ) -> Result<TidePredictionWindow, FetchError> {
        self.fetch_predictions(station, hours).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = NoaaConfig::new();

        assert_eq!(config.stations_url, DEFAULT_STATIONS_URL);
        assert_eq!(config.data_url, DEFAULT_DATA_URL);
        assert_eq!(config.datum, "MLLW");
        assert_eq!(config.units, "english");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = NoaaConfig::new()
            .with_stations_url("http://localhost:8080/stations.json")
            .with_data_url("http://localhost:8080/datagetter")
            .with_application("tides-test")
            .metric()
            .with_timeout(5);

        assert_eq!(config.stations_url, "http://localhost:8080/stations.json");
        assert_eq!(config.data_url, "http://localhost:8080/datagetter");
        assert_eq!(config.application, "tides-test");
        assert_eq!(config.units, "metric");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        let client = NoaaClient::new(NoaaConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn begin_date_layout() {
        use chrono::TimeZone;

        let t = Utc.with_ymd_and_hms(2021, 3, 20, 7, 5, 0).unwrap();
        assert_eq!(t.format(BEGIN_DATE_FORMAT).to_string(), "20210320 07:05");
    }

    #[test]
    fn unauthorized_and_forbidden() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let result: Result<StationsResponse, _> = decode_response(status, String::new());
            assert!(matches!(result, Err(FetchError::Unauthorized)));
        }
    }

    #[test]
    fn other_failure_status_keeps_body() {
        let result: Result<StationsResponse, _> =
            decode_response(StatusCode::SERVICE_UNAVAILABLE, "try later".to_string());

        match result {
            Err(FetchError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "try later");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn success_decodes_body() {
        let body = r#"{"count":1,"stations":[
            {"id":"8443970","name":"Boston","state":"MA","lat":42.35,"lng":-71.05}
        ]}"#;

        let response: StationsResponse =
            decode_response(StatusCode::OK, body.to_string()).unwrap();

        assert_eq!(response.count, Some(1));
        assert_eq!(response.stations[0].id, "8443970");
    }

    #[test]
    fn undecodable_body_is_truncated() {
        let body = "x".repeat(BODY_SNIPPET_CHARS * 2);

        let result: Result<StationsResponse, _> = decode_response(StatusCode::OK, body);

        match result {
            Err(FetchError::Json {
                body: Some(snippet),
                ..
            }) => assert_eq!(snippet.chars().count(), BODY_SNIPPET_CHARS),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn short_undecodable_body_is_kept_whole() {
        let result: Result<StationsResponse, _> =
            decode_response(StatusCode::OK, "<html>".to_string());

        match result {
            Err(FetchError::Json { body, .. }) => assert_eq!(body.as_deref(), Some("<html>")),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn embedded_error_object_is_api_error() {
        let response: PredictionsResponse = serde_json::from_str(
            r#"{"error":{"message":"No Predictions data was found."}}"#,
        )
        .unwrap();

        match window_from_response(response) {
            Err(FetchError::Api { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "No Predictions data was found.");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn predictions_become_sorted_window() {
        let response: PredictionsResponse = serde_json::from_str(
            r#"{"predictions":[
                {"t":"2021-03-20 10:30","v":"-0.210","type":"L"},
                {"t":"2021-03-20 04:12","v":"9.870","type":"H"}
            ]}"#,
        )
        .unwrap();

        let window = window_from_response(response).unwrap();

        assert_eq!(window.len(), 2);
        assert_eq!(window.predictions()[0].value, 9.87);
    }

    #[test]
    fn bad_prediction_is_decode_error() {
        let response: PredictionsResponse = serde_json::from_str(
            r#"{"predictions":[{"t":"yesterday","v":"1.0","type":"H"}]}"#,
        )
        .unwrap();

        assert!(matches!(
            window_from_response(response),
            Err(FetchError::Decode { .. })
        ));
    }

    #[test]
    fn missing_predictions_is_empty_window() {
        let response: PredictionsResponse = serde_json::from_str("{}").unwrap();

        assert!(window_from_response(response).unwrap().is_empty());
    }
}
