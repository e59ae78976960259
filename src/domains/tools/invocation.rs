//! Tool invocation request model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::error::ToolError;

/// A request naming a tool, an action on it, and action-specific parameters.
///
/// Missing fields decode to empty values and unknown top-level fields are
/// ignored; whether the result is legal is the validator's decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Tool name, e.g. `weight_logger`.
    #[serde(default)]
    pub tool: String,

    /// Action on the tool, e.g. `log`.
    #[serde(default)]
    pub action: String,

    /// Action parameters; values may be any JSON value.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ToolInvocation {
    /// Create an invocation without parameters.
    pub fn new(tool: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            action: action.into(),
            parameters: Map::new(),
        }
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Decode a JSON request body.
    pub fn decode(bytes: &[u8]) -> Result<Self, ToolError> {
        serde_json::from_slice(bytes).map_err(|e| ToolError::decode(e.to_string()))
    }

    /// Human-readable rendering for diagnostics only.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Sorted keys keep the rendering stable whatever map ordering serde_json uses.
        let sorted: BTreeMap<&String, &Value> = self.parameters.iter().collect();
        let parameters = serde_json::to_string(&sorted).map_err(|_| fmt::Error)?;
        write!(
            f,
            "Tool: {} | Action: {} | Parameters {}",
            self.tool, self.action, parameters
        )
    }
}
