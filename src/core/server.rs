//! Tool server implementation and lifecycle management.
//!
//! `McpServer` wires the ports to their adapters and owns the `Dispatcher`.
//! Transports only call `handle_request` and `list_tools`; with the `stdio`
//! feature it also implements the rmcp `ServerHandler`.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in `domains/tools/registry.rs`. The rmcp ToolRouter is
//! built from that registry in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::config::{Config, StorageBackend};
use super::error::Error;
use crate::domains::tools::{Dispatcher, ToolError, ToolRegistry};
use crate::domains::weather::OpenMeteoClient;
use crate::domains::weight::{MemoryWeightStore, SqliteWeightStore, WeightStore};

#[cfg(feature = "stdio")]
use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};

#[cfg(feature = "stdio")]
use crate::domains::tools::build_tool_router;

/// The main server handler.
///
/// Cheap to clone: configuration and dispatcher are shared behind `Arc`s.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Validates and routes tool invocations.
    dispatcher: Arc<Dispatcher>,

    /// Tool router for MCP tool calls.
    #[cfg(feature = "stdio")]
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server, opening the configured weight store and weather client.
    pub fn new(config: Config) -> Result<Self, Error> {
        let store: Arc<dyn WeightStore> = match config.storage.backend {
            StorageBackend::Sqlite => {
                info!("Weight store: SQLite at {}", config.storage.db_path.display());
                Arc::new(SqliteWeightStore::open(&config.storage.db_path)?)
            }
            StorageBackend::Memory => {
                warn!("Weight store: in-memory, entries are lost on restart");
                Arc::new(MemoryWeightStore::new())
            }
        };

        let weather = Arc::new(OpenMeteoClient::new(&config.weather)?);
        info!("Weather provider: {}", weather.base_url());

        Ok(Self::with_dispatcher(config, Dispatcher::new(store, weather)))
    }

    /// Create a server around an already wired dispatcher.
    pub fn with_dispatcher(config: Config, dispatcher: Dispatcher) -> Self {
        let dispatcher = Arc::new(dispatcher);

        Self {
            #[cfg(feature = "stdio")]
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Handle one raw request body and return the rendered result text.
    pub async fn handle_request(&self, body: &[u8]) -> Result<String, ToolError> {
        self.dispatcher.handle(body).await
    }

    /// Catalog of every tool with its actions and parameter schemas.
    pub fn list_tools(&self) -> Value {
        ToolRegistry::catalog()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[cfg(feature = "stdio")]
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Weight tracking and weather lookup. Every tool takes an `action` \
                 argument plus that action's parameters."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
