//! Weather lookup error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while fetching a temperature reading.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered with a non-success HTTP status.
    #[error("weather service returned status {0}")]
    Status(StatusCode),

    /// The request never produced a response (timeout, DNS, refused...).
    #[error("request failed: {0}")]
    Request(String),

    /// The response body was not the expected forecast document.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The forecast contained no temperature value at index 0.
    #[error("no temperature data in response")]
    NoData,
}

impl WeatherError {
    /// Create a "request failed" error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create an "invalid response" error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
