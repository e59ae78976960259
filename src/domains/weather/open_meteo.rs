//! Open-Meteo forecast adapter.
//!
//! Example request:
//! `https://api.open-meteo.com/v1/forecast?latitude=52.52&longitude=13.41&hourly=temperature_2m&temperature_unit=fahrenheit`
//!
//! The free tier allows 10,000 non-commercial calls per day.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::WeatherError;
use super::provider::WeatherProvider;
use crate::core::config::WeatherConfig;

/// Public Open-Meteo forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlySeries,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
}

/// Weather provider backed by the Open-Meteo HTTP API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Create a client from configuration.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    /// The forecast endpoint this client queries.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn current_temperature(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<f64, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", "temperature_2m".to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherError::request("request timed out")
                } else if e.is_connect() {
                    WeatherError::request("connection failed")
                } else {
                    WeatherError::request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather provider returned {}", status);
            return Err(WeatherError::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherError::invalid_response(e.to_string()))?;

        debug!("Forecast response received: {} bytes", body.len());

        let forecast: ForecastResponse = serde_json::from_slice(&body)
            .map_err(|e| WeatherError::invalid_response(format!("JSON parse error: {e}")))?;

        forecast
            .hourly
            .temperature_2m
            .first()
            .copied()
            .flatten()
            .ok_or(WeatherError::NoData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::RawQuery, http::StatusCode, routing::get};

    /// Serve `app` on an ephemeral local port and return its forecast URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/forecast")
    }

    async fn fixed_provider(status: StatusCode, body: &'static str) -> OpenMeteoClient {
        let app = Router::new().route("/v1/forecast", get(move || async move { (status, body) }));
        client_for(serve(app).await)
    }

    fn client_for(api_url: String) -> OpenMeteoClient {
        OpenMeteoClient::new(&WeatherConfig {
            api_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_reads_first_hourly_temperature() {
        let client = fixed_provider(
            StatusCode::OK,
            r#"{"latitude":52.52,"longitude":13.41,"hourly":{"time":["t0","t1"],"temperature_2m":[41.2,43.0]}}"#,
        )
        .await;

        let temperature = client.current_temperature(52.52, 13.41).await.unwrap();
        assert_eq!(temperature, 41.2);
    }

    #[tokio::test]
    async fn test_sends_fahrenheit_hourly_query() {
        let app = Router::new().route(
            "/v1/forecast",
            get(|RawQuery(query): RawQuery| async move {
                let query = query.unwrap_or_default();
                let expected = [
                    "latitude=52.52",
                    "longitude=13.41",
                    "hourly=temperature_2m",
                    "temperature_unit=fahrenheit",
                ];
                if expected.iter().all(|part| query.contains(part)) {
                    (StatusCode::OK, r#"{"hourly":{"temperature_2m":[60.0]}}"#)
                } else {
                    (StatusCode::BAD_REQUEST, "unexpected query")
                }
            }),
        );
        let client = client_for(serve(app).await);

        assert_eq!(client.current_temperature(52.52, 13.41).await.unwrap(), 60.0);
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let client = fixed_provider(StatusCode::SERVICE_UNAVAILABLE, "down").await;

        let err = client.current_temperature(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let client = fixed_provider(StatusCode::OK, "<html>nope</html>").await;

        let err = client.current_temperature(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_or_null_series_is_no_data() {
        let empty = fixed_provider(StatusCode::OK, r#"{"hourly":{"temperature_2m":[]}}"#).await;
        assert!(matches!(
            empty.current_temperature(0.0, 0.0).await,
            Err(WeatherError::NoData)
        ));

        let null = fixed_provider(StatusCode::OK, r#"{"hourly":{"temperature_2m":[null,50.0]}}"#).await;
        assert!(matches!(
            null.current_temperature(0.0, 0.0).await,
            Err(WeatherError::NoData)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_request_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{addr}/v1/forecast"));
        let err = client.current_temperature(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::Request(_)));
    }

    #[test]
    fn test_base_url_from_config() {
        let client = client_for(DEFAULT_FORECAST_URL.to_string());
        assert_eq!(client.base_url(), DEFAULT_FORECAST_URL);
    }
}
