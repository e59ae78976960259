//! Tool Registry - capability descriptors and validation for all tools.
//!
//! This module provides:
//! - The table of registered tools, each enumerating its legal actions and
//!   their parameter shapes
//! - `validate()`, which gates which (tool, action) pairs may run
//! - `Capability`, the typed routing key the dispatcher matches on
//! - A JSON catalog of tools for listing endpoints
//!
//! Validation is structural only. Parameter types are checked by each
//! handler when it extracts them.

use schemars::{JsonSchema, Schema};
use serde_json::{Map, Value, json};
use tracing::warn;

use super::ToolError;
use super::definitions::{WeatherAction, WeatherTool, WeightAction, WeightLoggerTool};
use super::invocation::ToolInvocation;

// ============================================================================
// Capability Descriptors
// ============================================================================

/// One legal action of a tool.
#[derive(Debug, Clone, Copy)]
pub struct ActionDescriptor {
    /// Wire name of the action.
    pub name: &'static str,

    /// Short description shown in catalogs.
    pub description: &'static str,

    /// JSON Schema of the action's parameters.
    pub parameters: fn() -> Schema,
}

/// A registered tool and the actions it accepts.
#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    /// Tool name as sent by clients.
    pub name: &'static str,

    /// Tool description shown to clients.
    pub description: &'static str,

    /// Legal actions.
    pub actions: &'static [ActionDescriptor],
}

/// Generate the JSON Schema for a parameter type.
pub fn schema_of<T: JsonSchema>() -> Schema {
    schemars::schema_for!(T)
}

impl ToolDescriptor {
    /// Find an action by name.
    pub fn action(&self, name: &str) -> Option<&'static ActionDescriptor> {
        self.actions.iter().find(|action| action.name == name)
    }

    /// Names of every legal action.
    pub fn action_names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|action| action.name).collect()
    }

    /// Flat input schema: a required `action` enum plus the union of every
    /// action's parameters.
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        properties.insert(
            "action".to_string(),
            json!({
                "type": "string",
                "enum": self.action_names(),
                "description": "Action to perform"
            }),
        );

        for action in self.actions {
            let schema = serde_json::to_value((action.parameters)()).unwrap_or_default();
            if let Some(Value::Object(params)) = schema.get("properties") {
                for (name, param) in params {
                    properties
                        .entry(name.clone())
                        .or_insert_with(|| param.clone());
                }
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(["action"]));
        schema
    }

    fn to_json(&self) -> Value {
        let actions: Vec<Value> = self
            .actions
            .iter()
            .map(|action| {
                json!({
                    "name": action.name,
                    "description": action.description,
                    "parameters": (action.parameters)()
                })
            })
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "actions": actions,
            "inputSchema": self.input_schema()
        })
    }
}

/// Every registered tool.
const TOOLS: &[ToolDescriptor] = &[WeightLoggerTool::DESCRIPTOR, WeatherTool::DESCRIPTOR];

// ============================================================================
// Capability
// ============================================================================

/// A (tool, action) pair resolved to its typed routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    WeightLogger(WeightAction),
    Weather(WeatherAction),
}

impl Capability {
    /// Resolve names to a capability, if one exists.
    pub fn resolve(tool: &str, action: &str) -> Option<Self> {
        match tool {
            WeightLoggerTool::NAME => WeightAction::from_name(action).map(Self::WeightLogger),
            WeatherTool::NAME => WeatherAction::from_name(action).map(Self::Weather),
            _ => None,
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - the single source of truth for which tools and actions exist.
pub struct ToolRegistry;

impl ToolRegistry {
    /// All registered tool descriptors.
    pub fn tools() -> &'static [ToolDescriptor] {
        TOOLS
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        TOOLS.iter().map(|tool| tool.name).collect()
    }

    /// Find a tool descriptor by name.
    pub fn find(name: &str) -> Option<&'static ToolDescriptor> {
        TOOLS.iter().find(|tool| tool.name == name)
    }

    /// Decide whether an invocation may be dispatched.
    ///
    /// Rules apply in order and the first failure wins: empty tool, empty
    /// action, unknown tool, unknown action for that tool.
    pub fn validate(invocation: &ToolInvocation) -> Result<(), ToolError> {
        if invocation.tool.is_empty() {
            return Err(ToolError::validation("tool name is required"));
        }
        if invocation.action.is_empty() {
            return Err(ToolError::validation("action is required"));
        }

        let Some(tool) = Self::find(&invocation.tool) else {
            warn!("Unknown tool requested: {}", invocation.tool);
            return Err(ToolError::validation(format!(
                "unknown tool: {}",
                invocation.tool
            )));
        };

        if tool.action(&invocation.action).is_none() {
            warn!(
                "Unknown action requested: {}/{}",
                invocation.tool, invocation.action
            );
            return Err(ToolError::validation(format!(
                "unknown action: {}",
                invocation.action
            )));
        }

        Ok(())
    }

    /// JSON catalog of every tool, its actions, and their parameter schemas.
    pub fn catalog() -> Value {
        Value::Array(TOOLS.iter().map(ToolDescriptor::to_json).collect())
    }
}
