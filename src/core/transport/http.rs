//! HTTP transport implementation.
//!
//! One POST endpoint takes a raw tool invocation body and answers with the
//! rendered result as `text/plain`. Status codes:
//!
//! - `200` with the result text
//! - `400` with the error message for malformed bodies, validation failures,
//!   bad parameters, and handler failures
//! - `500` when a validated invocation could not be routed
//!
//! `GET /tools`, `GET /health` and `GET /` are informational JSON endpoints.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use http::StatusCode;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use super::{TransportConfig, TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The server instance.
    server: McpServer,
    /// Path of the tool endpoint, echoed by the root handler.
    tool_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Create from TransportConfig (extracts HTTP config).
    pub fn from_transport_config(config: &TransportConfig) -> Option<Self> {
        match config {
            TransportConfig::Http(http_config) => Some(Self::new(http_config.clone())),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the router serving every endpoint.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            tool_path: self.config.tool_path.clone(),
        };

        let mut app = Router::new()
            .route(&self.config.tool_path, post(handle_tool))
            .route("/tools", get(list_tools))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Tool:   POST {}", self.config.tool_path);
        info!("  → Tools:  GET /tools");
        info!("  → Health: GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "tool": state.tool_path,
            "tools": "/tools",
            "health": "/health"
        },
        "documentation": format!(
            "POST {} with {{\"tool\": ..., \"action\": ..., \"parameters\": {{...}}}}",
            state.tool_path
        )
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Tool catalog endpoint.
async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "tools": state.server.list_tools() }))
}

/// Handle one tool invocation.
#[instrument(skip_all, fields(bytes = body.len()))]
async fn handle_tool(State(state): State<AppState>, body: Bytes) -> Response {
    match state.server.handle_request(&body).await {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) if e.is_internal() => {
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}
