//! Tools domain module.
//!
//! This module handles tool invocations end to end: decoding the request,
//! validating the (tool, action) pair, and routing it to a handler.
//!
//! ## Architecture
//!
//! - `invocation.rs` - `ToolInvocation` request model, decode and describe
//! - `registry.rs` - Capability descriptors, validator, and tool catalog
//! - `dispatcher.rs` - Routes validated invocations to one handler
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - rmcp ToolRouter builder for the STDIO transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a `DESCRIPTOR` and `execute()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register the descriptor and a `Capability` variant in `registry.rs`
//! 4. Route the new variant in `dispatcher.rs`
//!
//! Transports never need to change: both HTTP and STDIO read the registry.

pub mod definitions;
mod dispatcher;
mod error;
mod invocation;
mod registry;
#[cfg(feature = "stdio")]
pub mod router;

pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use invocation::ToolInvocation;
pub use registry::{ActionDescriptor, Capability, ToolDescriptor, ToolRegistry, schema_of};
#[cfg(feature = "stdio")]
pub use router::build_tool_router;
