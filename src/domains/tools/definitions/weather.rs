//! Weather tool.
//!
//! Looks up the current temperature for a coordinate through the
//! `WeatherProvider` port.

use schemars::JsonSchema;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::common::number_param;
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::{ActionDescriptor, ToolDescriptor, schema_of};
use crate::domains::weather::{WeatherProvider, WeatherReading};

/// Actions supported by the weather tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherAction {
    /// Current temperature at a coordinate.
    GetWeather,
}

impl WeatherAction {
    /// Wire name of the action.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetWeather => "get_weather",
        }
    }

    /// Look up an action by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        (name == Self::GetWeather.as_str()).then_some(Self::GetWeather)
    }
}

/// Parameters for the `get_weather` action.
#[derive(Debug, Clone, Copy, PartialEq, JsonSchema)]
pub struct GetWeatherParams {
    /// Latitude in decimal degrees.
    #[schemars(description = "Latitude in decimal degrees")]
    pub latitude: f64,

    /// Longitude in decimal degrees.
    #[schemars(description = "Longitude in decimal degrees")]
    pub longitude: f64,
}

impl GetWeatherParams {
    /// Extract from raw invocation parameters, latitude first.
    pub fn from_parameters(parameters: &Map<String, Value>) -> Result<Self, ToolError> {
        Ok(Self {
            latitude: number_param(
                parameters,
                "latitude",
                "latitude must be a floating point number",
            )?,
            longitude: number_param(
                parameters,
                "longitude",
                "longitude must be a floating point number",
            )?,
        })
    }
}

/// Weather tool implementation.
#[derive(Clone)]
pub struct WeatherTool {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherTool {
    /// Tool name as sent by clients.
    pub const NAME: &'static str = "weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Current temperature in degrees Fahrenheit for a latitude/longitude pair.";

    /// Legal actions and their parameter shapes.
    pub const ACTIONS: &'static [ActionDescriptor] = &[ActionDescriptor {
        name: WeatherAction::GetWeather.as_str(),
        description: "Fetch the current temperature for a coordinate",
        parameters: schema_of::<GetWeatherParams>,
    }];

    /// Capability descriptor registered with the validator.
    pub const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: Self::NAME,
        description: Self::DESCRIPTION,
        actions: Self::ACTIONS,
    };

    /// Create the tool over a weather provider.
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Run one action and render its result.
    #[instrument(skip(self, parameters), fields(action = action.as_str()))]
    pub async fn execute(
        &self,
        action: WeatherAction,
        parameters: &Map<String, Value>,
    ) -> Result<String, ToolError> {
        match action {
            WeatherAction::GetWeather => {
                let params = GetWeatherParams::from_parameters(parameters)?;
                let reading = self.get_weather(params).await?;
                Ok(reading.to_string())
            }
        }
    }

    /// Fetch a reading. Exactly one provider call, no retry.
    pub async fn get_weather(&self, params: GetWeatherParams) -> Result<WeatherReading, ToolError> {
        let temperature = self
            .provider
            .current_temperature(params.latitude, params.longitude)
            .await
            .map_err(|e| {
                error!("Weather lookup failed: {}", e);
                ToolError::handler("failed to get temperature data", e)
            })?;

        info!(
            "Temperature at ({}, {}): {}",
            params.latitude, params.longitude, temperature
        );

        Ok(WeatherReading {
            latitude: params.latitude,
            longitude: params.longitude,
            temperature,
        })
    }
}
