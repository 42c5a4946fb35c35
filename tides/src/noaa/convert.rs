//! Conversion from NOAA DTOs to domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use crate::domain::{Station, StationId, TidePrediction, TidePredictionWindow, TideType};

use super::types::{PredictionDto, StationDto};

/// Timestamp layout used by the data getter.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Error converting a DTO to a domain type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid timestamp {0:?}")]
    InvalidTime(String),

    #[error("invalid water level {0:?}")]
    InvalidValue(String),

    #[error("unknown tide type {0:?}")]
    UnknownTideType(String),
}

/// Convert the station list, dropping entries without a usable id.
pub fn convert_stations(stations: Vec<StationDto>) -> Vec<Station> {
    let total = stations.len();

    let converted: Vec<Station> = stations
        .into_iter()
        .filter_map(|s| {
            let id = StationId::parse(s.id.trim()).ok()?;
            Some(Station::new(
                id,
                s.name,
                s.state.unwrap_or_default(),
                s.lat,
                s.lng,
            ))
        })
        .collect();

    if converted.len() < total {
        debug!(
            dropped = total - converted.len(),
            "dropped stations with invalid ids"
        );
    }

    converted
}

/// Convert one prediction.
///
/// NOAA timestamps carry no offset; we always request `time_zone=gmt`.
pub fn convert_prediction(dto: &PredictionDto) -> Result<TidePrediction, ConversionError> {
    let naive = NaiveDateTime::parse_from_str(&dto.t, TIME_FORMAT)
        .map_err(|_| ConversionError::InvalidTime(dto.t.clone()))?;
    let time = DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc);

    let value: f64 = dto
        .v
        .trim()
        .parse()
        .map_err(|_| ConversionError::InvalidValue(dto.v.clone()))?;

    let tide_type = TideType::from_code(dto.tide_type.trim())
        .ok_or_else(|| ConversionError::UnknownTideType(dto.tide_type.clone()))?;

    Ok(TidePrediction::new(time, value, tide_type))
}

/// Convert a full prediction list into an ordered window.
///
/// Any unconvertible entry fails the whole window; a partial window would
/// misrepresent the tide cycle.
pub fn convert_window(dtos: &[PredictionDto]) -> Result<TidePredictionWindow, ConversionError> {
    let predictions = dtos
        .iter()
        .map(convert_prediction)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TidePredictionWindow::new(predictions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn dto(t: &str, v: &str, tide_type: &str) -> PredictionDto {
        PredictionDto {
            t: t.to_string(),
            v: v.to_string(),
            tide_type: tide_type.to_string(),
        }
    }

    fn station_dto(id: &str, name: &str, state: Option<&str>) -> StationDto {
        StationDto {
            id: id.to_string(),
            name: name.to_string(),
            state: state.map(str::to_string),
            lat: 0.0,
            lng: 0.0,
        }
    }

    #[test]
    fn stations_drop_empty_ids() {
        let stations = convert_stations(vec![
            station_dto("8443970", "Boston", Some("MA")),
            station_dto("", "Nowhere", Some("XX")),
            station_dto("   ", "Blank", None),
            station_dto("8418150", "Portland", Some("ME")),
        ]);

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "Boston");
        assert_eq!(stations[1].id.as_str(), "8418150");
    }

    #[test]
    fn stations_missing_state_becomes_empty() {
        let stations = convert_stations(vec![station_dto("2695540", "Bermuda", None)]);
        assert_eq!(stations[0].state, "");
    }

    #[test]
    fn prediction_parses_fields() {
        let p = convert_prediction(&dto("2021-03-20 04:12", "-0.351", "L")).unwrap();

        assert_eq!(p.time, Utc.with_ymd_and_hms(2021, 3, 20, 4, 12, 0).unwrap());
        assert_eq!(p.time.minute(), 12);
        assert!((p.value - -0.351).abs() < 1e-9);
        assert_eq!(p.tide_type, TideType::Low);
    }

    #[test]
    fn prediction_rejects_bad_fields() {
        assert_eq!(
            convert_prediction(&dto("20/03/2021", "1.0", "H")),
            Err(ConversionError::InvalidTime("20/03/2021".into()))
        );
        assert_eq!(
            convert_prediction(&dto("2021-03-20 04:12", "n/a", "H")),
            Err(ConversionError::InvalidValue("n/a".into()))
        );
        assert_eq!(
            convert_prediction(&dto("2021-03-20 04:12", "1.0", "X")),
            Err(ConversionError::UnknownTideType("X".into()))
        );
    }

    #[test]
    fn window_is_sorted() {
        let window = convert_window(&[
            dto("2021-03-20 10:20", "9.4", "H"),
            dto("2021-03-20 04:12", "0.3", "L"),
        ])
        .unwrap();

        assert_eq!(window.len(), 2);
        assert_eq!(window.predictions()[0].tide_type, TideType::Low);
    }

    #[test]
    fn window_fails_on_any_bad_entry() {
        let result = convert_window(&[
            dto("2021-03-20 04:12", "0.3", "L"),
            dto("garbage", "9.4", "H"),
        ]);
        assert!(result.is_err());
    }
}
