//! Weight logger tool.
//!
//! Records body weight and reports history and the change since the first
//! entry. Storage goes through the `WeightStore` port, so the same handler
//! runs against SQLite in production and memory in tests.

use schemars::JsonSchema;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::common::{NoParams, number_param};
use crate::domains::tools::ToolError;
use crate::domains::tools::registry::{ActionDescriptor, ToolDescriptor, schema_of};
use crate::domains::weight::{ChangeOutcome, WeightEntry, WeightStore, WeightTracker};

/// Rendered `history` result when nothing has been logged.
pub const NO_ENTRIES_MESSAGE: &str = "No weight entries yet.";

/// Rendered `change` result when fewer than two entries exist.
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough data to compute change";

// ============================================================================
// Actions & Parameters
// ============================================================================

/// Actions supported by the weight logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightAction {
    /// Append a weight recorded now.
    Log,
    /// List every entry, oldest first.
    History,
    /// Difference between the newest and oldest entry.
    Change,
}

impl WeightAction {
    /// Every action, in registry order.
    pub const ALL: [Self; 3] = [Self::Log, Self::History, Self::Change];

    /// Wire name of the action.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::History => "history",
            Self::Change => "change",
        }
    }

    /// Look up an action by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == name)
    }
}

/// Parameters for the `log` action.
#[derive(Debug, Clone, Copy, PartialEq, JsonSchema)]
pub struct LogWeightParams {
    /// Weight in pounds.
    #[schemars(description = "Weight in pounds")]
    pub weight: f64,
}

impl LogWeightParams {
    /// Extract from raw invocation parameters.
    pub fn from_parameters(parameters: &Map<String, Value>) -> Result<Self, ToolError> {
        Ok(Self {
            weight: number_param(parameters, "weight", "weight parameter must be a number")?,
        })
    }
}

// ============================================================================
// Tool Implementation
// ============================================================================

/// Weight logger tool implementation.
#[derive(Clone)]
pub struct WeightLoggerTool {
    tracker: WeightTracker,
}

impl WeightLoggerTool {
    /// Tool name as sent by clients.
    pub const NAME: &'static str = "weight_logger";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Track body weight in pounds. \
         `log` records a weight, `history` lists every entry oldest first, \
         and `change` reports the difference between the newest and oldest entry.";

    /// Legal actions and their parameter shapes.
    pub const ACTIONS: &'static [ActionDescriptor] = &[
        ActionDescriptor {
            name: WeightAction::Log.as_str(),
            description: "Record a weight at the current time",
            parameters: schema_of::<LogWeightParams>,
        },
        ActionDescriptor {
            name: WeightAction::History.as_str(),
            description: "List all recorded weights, oldest first",
            parameters: schema_of::<NoParams>,
        },
        ActionDescriptor {
            name: WeightAction::Change.as_str(),
            description: "Weight change between the first and the latest entry",
            parameters: schema_of::<NoParams>,
        },
    ];

    /// Capability descriptor registered with the validator.
    pub const DESCRIPTOR: ToolDescriptor = ToolDescriptor {
        name: Self::NAME,
        description: Self::DESCRIPTION,
        actions: Self::ACTIONS,
    };

    /// Create the tool over a weight store.
    pub fn new(store: Arc<dyn WeightStore>) -> Self {
        Self {
            tracker: WeightTracker::new(store),
        }
    }

    /// Run one action and render its result.
    #[instrument(skip(self, parameters), fields(action = action.as_str()))]
    pub async fn execute(
        &self,
        action: WeightAction,
        parameters: &Map<String, Value>,
    ) -> Result<String, ToolError> {
        match action {
            WeightAction::Log => {
                let params = LogWeightParams::from_parameters(parameters)?;
                self.log(params.weight).await
            }
            WeightAction::History => self.history().await,
            WeightAction::Change => self.change().await,
        }
    }

    async fn log(&self, weight: f64) -> Result<String, ToolError> {
        self.tracker.log(weight).await.map_err(|e| {
            error!("Failed to log weight: {}", e);
            ToolError::handler("failed to log weight", e)
        })?;

        info!("Logged weight: {}", weight);
        Ok(render_logged(weight))
    }

    async fn history(&self) -> Result<String, ToolError> {
        let history = self.tracker.history().await.map_err(|e| {
            error!("Failed to load weight history: {}", e);
            ToolError::handler("failed to get history", e)
        })?;

        Ok(render_history(&history))
    }

    async fn change(&self) -> Result<String, ToolError> {
        let outcome = self.tracker.change().await.map_err(|e| {
            error!("Failed to compute weight change: {}", e);
            ToolError::handler("failed to compute change", e)
        })?;

        if outcome == ChangeOutcome::InsufficientData {
            debug!("Fewer than two weight entries, no change to report");
        }

        Ok(render_change(outcome))
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a successful `log`.
pub fn render_logged(weight: f64) -> String {
    format!("Logged weight: {weight:.1}")
}

/// Render `history`, one entry per line with no trailing newline.
pub fn render_history(entries: &[WeightEntry]) -> String {
    if entries.is_empty() {
        return NO_ENTRIES_MESSAGE.to_string();
    }

    entries
        .iter()
        .map(|entry| {
            format!(
                "{}: {:.1} lbs",
                entry.timestamp_rfc3339(),
                entry.weight_lbs
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render `change` with an explicit sign.
pub fn render_change(outcome: ChangeOutcome) -> String {
    match outcome {
        ChangeOutcome::Change(delta) => format!("Weight change: {delta:+.1} lbs"),
        ChangeOutcome::InsufficientData => INSUFFICIENT_DATA_MESSAGE.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::weight::MemoryWeightStore;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn tool_with_store() -> (WeightLoggerTool, Arc<MemoryWeightStore>) {
        let store = Arc::new(MemoryWeightStore::new());
        (WeightLoggerTool::new(store.clone()), store)
    }

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in WeightAction::ALL {
            assert_eq!(WeightAction::from_name(action.as_str()), Some(action));
        }
        assert_eq!(WeightAction::from_name("delete"), None);
        assert_eq!(WeightAction::from_name("Log"), None);
    }

    #[test]
    fn test_descriptor_lists_every_action() {
        let names: Vec<_> = WeightLoggerTool::DESCRIPTOR
            .actions
            .iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["log", "history", "change"]);
    }

    #[tokio::test]
    async fn test_log_renders_one_decimal() {
        let (tool, store) = tool_with_store();
        let result = tool
            .execute(WeightAction::Log, &params(json!({ "weight": 150.26 })))
            .await
            .unwrap();
        assert_eq!(result, "Logged weight: 150.3");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_log_with_non_numeric_weight_appends_nothing() {
        let (tool, store) = tool_with_store();
        let err = tool
            .execute(WeightAction::Log, &params(json!({ "weight": "heavy" })))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Parameter(_)));
        assert_eq!(err.to_string(), "weight parameter must be a number");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_history_empty_message() {
        let (tool, _) = tool_with_store();
        let result = tool
            .execute(WeightAction::History, &Map::new())
            .await
            .unwrap();
        assert_eq!(result, "No weight entries yet.");
    }

    #[tokio::test]
    async fn test_change_with_one_entry_is_not_an_error() {
        let (tool, _) = tool_with_store();
        tool.execute(WeightAction::Log, &params(json!({ "weight": 150 })))
            .await
            .unwrap();

        let result = tool.execute(WeightAction::Change, &Map::new()).await;
        assert_eq!(result.unwrap(), "Not enough data to compute change");
    }

    #[tokio::test]
    async fn test_change_after_three_logs() {
        let (tool, store) = tool_with_store();
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 7, 0, 0).unwrap();
        for (day, weight) in [(0, 150.0), (1, 148.5), (2, 149.0)] {
            store
                .append(WeightEntry::new(base + chrono::Duration::days(day), weight))
                .await
                .unwrap();
        }

        let result = tool.execute(WeightAction::Change, &Map::new()).await;
        assert_eq!(result.unwrap(), "Weight change: -1.0 lbs");
    }

    #[test]
    fn test_render_history_lines() {
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 7, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 1, 2, 7, 0, 0).unwrap();
        let rendered = render_history(&[WeightEntry::new(t0, 150.0), WeightEntry::new(t1, 148.55)]);
        assert_eq!(
            rendered,
            "2025-01-01T07:00:00Z: 150.0 lbs\n2025-01-02T07:00:00Z: 148.6 lbs"
        );
    }

    #[test]
    fn test_render_change_always_signed() {
        assert_eq!(render_change(ChangeOutcome::Change(2.0)), "Weight change: +2.0 lbs");
        assert_eq!(render_change(ChangeOutcome::Change(0.0)), "Weight change: +0.0 lbs");
        assert_eq!(render_change(ChangeOutcome::Change(-1.26)), "Weight change: -1.3 lbs");
    }
}
