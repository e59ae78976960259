//! Dispatcher - routes validated invocations to exactly one handler.
//!
//! A request moves through two stages: decode + validate, then dispatch.
//! A failure at either stage ends the request; nothing is retried.

use std::sync::Arc;
use tracing::{debug, error, warn};

use super::ToolError;
use super::definitions::{WeatherTool, WeightLoggerTool};
use super::invocation::ToolInvocation;
use super::registry::{Capability, ToolRegistry};
use crate::domains::weather::WeatherProvider;
use crate::domains::weight::WeightStore;

/// Routes tool invocations to their handlers.
#[derive(Clone)]
pub struct Dispatcher {
    weight_logger: WeightLoggerTool,
    weather: WeatherTool,
}

impl Dispatcher {
    /// Create a dispatcher over the persistence and weather ports.
    pub fn new(store: Arc<dyn WeightStore>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            weight_logger: WeightLoggerTool::new(store),
            weather: WeatherTool::new(weather),
        }
    }

    /// Decode a raw request body and run it.
    pub async fn handle(&self, body: &[u8]) -> Result<String, ToolError> {
        let invocation = ToolInvocation::decode(body).inspect_err(|e| {
            warn!("Rejected request body: {}", e);
        })?;
        self.run(&invocation).await
    }

    /// Validate an invocation, then dispatch it.
    ///
    /// Validation failures never reach a handler, so they have no side effects.
    pub async fn run(&self, invocation: &ToolInvocation) -> Result<String, ToolError> {
        debug!("{}", invocation.describe());

        if let Err(e) = ToolRegistry::validate(invocation) {
            warn!("Validation failed: {}", e);
            return Err(e);
        }

        let result = self.dispatch(invocation).await;
        if let Err(ref e) = result {
            if !e.is_internal() {
                warn!("{} failed: {}", invocation.describe(), e);
            }
        }
        result
    }

    /// Route a validated invocation to its handler.
    ///
    /// An invocation with no routing entry means the registry and this
    /// routing table disagree; it surfaces as an internal error.
    pub async fn dispatch(&self, invocation: &ToolInvocation) -> Result<String, ToolError> {
        let Some(capability) = Capability::resolve(&invocation.tool, &invocation.action) else {
            error!(
                internal = true,
                tool = %invocation.tool,
                action = %invocation.action,
                "Validated invocation has no routing entry"
            );
            return Err(ToolError::dispatch(&invocation.tool, &invocation.action));
        };

        match capability {
            Capability::WeightLogger(action) => {
                self.weight_logger
                    .execute(action, &invocation.parameters)
                    .await
            }
            Capability::Weather(action) => self.weather.execute(action, &invocation.parameters).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::weather::StubWeatherProvider;
    use crate::domains::weight::MemoryWeightStore;
    use tokio_test::{assert_err, assert_ok};

    struct Fixture {
        dispatcher: Dispatcher,
        store: Arc<MemoryWeightStore>,
        weather: Arc<StubWeatherProvider>,
    }

    fn fixture_with(weather: StubWeatherProvider) -> Fixture {
        let store = Arc::new(MemoryWeightStore::new());
        let weather = Arc::new(weather);
        Fixture {
            dispatcher: Dispatcher::new(store.clone(), weather.clone()),
            store,
            weather,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(StubWeatherProvider::reading(68.0))
    }

    #[tokio::test]
    async fn test_invalid_requests_have_no_side_effects() {
        let f = fixture();
        let bodies: [&[u8]; 5] = [
            br#"{"tool":"","action":"log","parameters":{"weight":150}}"#,
            br#"{"tool":"weight_logger","action":"","parameters":{"weight":150}}"#,
            br#"{"tool":"weather","action":"","parameters":{"latitude":1,"longitude":2}}"#,
            br#"{"tool":"scale","action":"log","parameters":{"weight":150}}"#,
            br#"{"tool":"weight_logger","action":"delete"}"#,
        ];

        for body in bodies {
            let err = assert_err!(f.dispatcher.handle(body).await);
            assert!(matches!(err, ToolError::Validation(_)));
        }

        assert!(f.store.is_empty().await);
        assert_eq!(f.weather.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let f = fixture();
        let err = assert_err!(f.dispatcher.handle(b"{not json").await);
        assert!(matches!(err, ToolError::Decode(_)));
    }

    #[tokio::test]
    async fn test_log_then_history_then_change() {
        let f = fixture();

        for weight in ["150.0", "148.5", "149.0"] {
            let body = format!(
                r#"{{"tool":"weight_logger","action":"log","parameters":{{"weight":{weight}}}}}"#
            );
            assert_ok!(f.dispatcher.handle(body.as_bytes()).await);
        }

        let history = assert_ok!(
            f.dispatcher
                .run(&ToolInvocation::new("weight_logger", "history"))
                .await
        );
        let lines: Vec<_> = history.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(": 150.0 lbs"));
        assert!(lines[2].ends_with(": 149.0 lbs"));
        assert!(!history.ends_with('\n'));

        let change = assert_ok!(
            f.dispatcher
                .run(&ToolInvocation::new("weight_logger", "change"))
                .await
        );
        assert_eq!(change, "Weight change: -1.0 lbs");
    }

    #[tokio::test]
    async fn test_routes_weather_to_provider() {
        let f = fixture();
        let invocation = ToolInvocation::new("weather", "get_weather")
            .with_parameter("latitude", 52.52)
            .with_parameter("longitude", 13.41);

        let result = assert_ok!(f.dispatcher.run(&invocation).await);
        assert_eq!(
            result,
            "Weather at lat: 52.520000 long: 13.410000 | 68.000000"
        );
        assert_eq!(f.weather.calls(), 1);
        assert!(f.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_weather_failure_surfaces_status() {
        let f = fixture_with(StubWeatherProvider::failing());
        let invocation = ToolInvocation::new("weather", "get_weather")
            .with_parameter("latitude", 0.0)
            .with_parameter("longitude", 0.0);

        let err = assert_err!(f.dispatcher.run(&invocation).await);
        assert!(matches!(err, ToolError::Handler { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_unroutable_invocation_is_internal_error() {
        let f = fixture();
        // Skips validation on purpose to reach the routing fallback.
        let err = assert_err!(
            f.dispatcher
                .dispatch(&ToolInvocation::new("weather", "delete"))
                .await
        );
        assert!(err.is_internal());
        assert!(matches!(err, ToolError::Dispatch { .. }));
    }
}
