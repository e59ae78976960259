//! Parameter helpers shared across tool handlers.
//!
//! Parameter types are checked here, at the point of use, rather than by the
//! validator.

use schemars::JsonSchema;
use serde_json::{Map, Value};

use crate::domains::tools::ToolError;

/// Parameter shape for actions that take no parameters.
#[derive(Debug, Clone, Copy, Default, JsonSchema)]
pub struct NoParams {}

/// Extract a numeric parameter, failing with `message` when it is missing or
/// not a JSON number.
pub fn number_param(
    parameters: &Map<String, Value>,
    name: &str,
    message: &str,
) -> Result<f64, ToolError> {
    parameters
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| ToolError::parameter(message))
}
