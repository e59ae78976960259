//! Weather port.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use super::error::WeatherError;

/// Source of current temperature readings.
///
/// A call is a single attempt: no retry, caching, or rate limiting happens
/// behind this trait.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current temperature in degrees Fahrenheit at the given coordinate.
    async fn current_temperature(&self, latitude: f64, longitude: f64)
    -> Result<f64, WeatherError>;
}

/// A temperature reading for a coordinate. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherReading {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
}

impl fmt::Display for WeatherReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weather at lat: {:.6} long: {:.6} | {:.6}",
            self.latitude, self.longitude, self.temperature
        )
    }
}

/// Provider returning a fixed result and counting calls.
#[cfg(test)]
pub(crate) struct StubWeatherProvider {
    temperature: Option<f64>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl StubWeatherProvider {
    /// Always answers with `temperature`.
    pub(crate) fn reading(temperature: f64) -> Self {
        Self {
            temperature: Some(temperature),
            calls: Default::default(),
        }
    }

    /// Always fails with a 500 status.
    pub(crate) fn failing() -> Self {
        Self {
            temperature: None,
            calls: Default::default(),
        }
    }

    /// Number of lookups made so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl WeatherProvider for StubWeatherProvider {
    async fn current_temperature(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<f64, WeatherError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.temperature
            .ok_or(WeatherError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
    }
}
