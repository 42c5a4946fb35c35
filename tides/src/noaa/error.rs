//! NOAA API error types.

/// Errors that can occur when fetching stations or predictions.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: the NOAA API rejected the request")]
    Unauthorized,

    /// API returned an error status, or an error object in the body
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response parsed but held values we could not convert
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Offline fixture data could not be read
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = FetchError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = FetchError::Decode {
            message: "bad timestamp".into(),
        };
        assert_eq!(err.to_string(), "decode error: bad timestamp");
    }
}
