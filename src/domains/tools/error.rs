//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while decoding, validating, or executing a tool call.
///
/// Every variant except [`ToolError::Dispatch`] is user-facing: its display
/// text is returned verbatim to the caller.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The request body is not a well-formed tool invocation.
    #[error("Invalid JSON: {0}")]
    Decode(String),

    /// Unknown tool or action, or a missing tool/action name.
    #[error("{0}")]
    Validation(String),

    /// A known action received a missing or wrongly typed parameter.
    #[error("{0}")]
    Parameter(String),

    /// The handler ran but its store or network call failed.
    #[error("{context}: {reason}")]
    Handler {
        context: &'static str,
        reason: String,
    },

    /// A validated invocation matched no routing entry.
    #[error("no handler registered for {tool}/{action}")]
    Dispatch { tool: String, action: String },
}

impl ToolError {
    /// Create a new "decode" error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new "validation" error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new "parameter" error.
    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }

    /// Create a new "handler" error wrapping a lower-level failure.
    pub fn handler(context: &'static str, reason: impl ToString) -> Self {
        Self::Handler {
            context,
            reason: reason.to_string(),
        }
    }

    /// Create a new "dispatch" error.
    pub fn dispatch(tool: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Dispatch {
            tool: tool.into(),
            action: action.into(),
        }
    }

    /// Whether this error signals a bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Dispatch { .. })
    }
}
