//! Transport layer for the tool server.
//!
//! This module provides different transport implementations:
//! - **HTTP**: Plain-text tool endpoint over POST requests - feature: `http`
//! - **STDIO**: MCP over standard input/output - feature: `stdio`
//!
//! Each transport handles the connection lifecycle and delegates
//! request processing to the `McpServer`.
//!
//! # Feature Flags
//!
//! Transport implementations are conditionally compiled based on features:
//! - `http` (default): HTTP transport - adds axum, tower, tower-http
//! - `stdio`: STDIO transport - adds rmcp

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
