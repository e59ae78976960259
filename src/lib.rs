//! Tracker Tool Server Library
//!
//! A small tool server: clients send `{tool, action, parameters}` requests,
//! each one is validated against a fixed table of tools and actions and then
//! routed to exactly one handler, whose result comes back as plain text.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server, and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Request model, validator, dispatcher, and tool handlers
//!   - **weight**: Weight entries, the persistence port, and its adapters
//!   - **weather**: The weather port and its Open-Meteo adapter
//!
//! # Example
//!
//! ```rust,no_run
//! use tracker_mcp_server::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::from_env())?;
//!     let reply = server
//!         .handle_request(br#"{"tool":"weight_logger","action":"history"}"#)
//!         .await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
