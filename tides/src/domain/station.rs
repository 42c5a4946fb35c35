//! Station types.

use std::fmt;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A NOAA station identifier, e.g. `"8443970"` or `"TPT2707"`.
///
/// Identifiers are opaque but never empty and never contain whitespace.
///
/// # Examples
///
/// ```
/// use tides::domain::StationId;
///
/// let boston = StationId::parse("8443970").unwrap();
/// assert_eq!(boston.as_str(), "8443970");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("84 43").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStationId {
                reason: "must not contain whitespace",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tide prediction station.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,

    /// Display name, e.g. "Boston".
    pub name: String,

    /// State or region code, e.g. "MA". Empty for stations outside the US.
    pub state: String,

    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    /// Create a new station.
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        state: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            state: state.into(),
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.state.is_empty() {
            write!(f, "{} ({})", self.name, self.id)
        } else {
            write!(f, "{}, {} ({})", self.name, self.state, self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StationId::parse("8443970").is_ok());
        assert!(StationId::parse("TPT2707").is_ok());
        assert!(StationId::parse("1").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::parse("").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(StationId::parse(" ").is_err());
        assert!(StationId::parse("844 3970").is_err());
        assert!(StationId::parse("8443970\n").is_err());
    }

    #[test]
    fn debug_and_display() {
        let id = StationId::parse("8418150").unwrap();
        assert_eq!(format!("{:?}", id), "StationId(8418150)");
        assert_eq!(format!("{}", id), "8418150");
    }

    #[test]
    fn station_display_includes_state_when_present() {
        let portland = Station::new(
            StationId::parse("8418150").unwrap(),
            "Portland",
            "ME",
            43.6567,
            -70.2467,
        );
        assert_eq!(portland.to_string(), "Portland, ME (8418150)");

        let bermuda = Station::new(
            StationId::parse("2695540").unwrap(),
            "Bermuda",
            "",
            32.3734,
            -64.7033,
        );
        assert_eq!(bermuda.to_string(), "Bermuda (2695540)");
    }
}
