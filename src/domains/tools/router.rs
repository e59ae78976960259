//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Each registered tool becomes one MCP tool whose arguments are
//! `{ "action": ..., <parameters> }`. Calls are rebuilt into a
//! `ToolInvocation` and take the same validate-then-dispatch path as HTTP.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content, Tool},
};
use serde_json::Value;
use std::sync::Arc;

use super::{Dispatcher, ToolDescriptor, ToolInvocation, ToolRegistry};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: Arc<Dispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRegistry::tools()
        .iter()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(create_route(descriptor, dispatcher.clone()))
        })
}

/// Create a Tool model for a descriptor (metadata).
pub fn to_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool {
        name: descriptor.name.into(),
        description: Some(descriptor.description.into()),
        input_schema: Arc::new(descriptor.input_schema()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Create a ToolRoute that forwards calls to the dispatcher.
fn create_route<S>(descriptor: &'static ToolDescriptor, dispatcher: Arc<Dispatcher>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    ToolRoute::new_dyn(to_tool(descriptor), move |ctx: ToolCallContext<'_, S>| {
        let mut parameters = ctx.arguments.clone().unwrap_or_default();
        let dispatcher = dispatcher.clone();
        async move {
            let action = match parameters.remove("action") {
                Some(Value::String(action)) => action,
                _ => String::new(),
            };
            let invocation = ToolInvocation {
                tool: descriptor.name.to_string(),
                action,
                parameters,
            };

            match dispatcher.run(&invocation).await {
                Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
                Err(e) if e.is_internal() => Err(McpError::internal_error(e.to_string(), None)),
                Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
            }
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::weather::StubWeatherProvider;
    use crate::domains::weight::MemoryWeightStore;

    struct TestServer {}

    fn test_dispatcher() -> Arc<Dispatcher> {
        Arc::new(Dispatcher::new(
            Arc::new(MemoryWeightStore::new()),
            Arc::new(StubWeatherProvider::reading(50.0)),
        ))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_dispatcher());
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"weight_logger"));
        assert!(names.contains(&"weather"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let router: ToolRouter<TestServer> = build_tool_router(test_dispatcher());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        let registry_names = ToolRegistry::tool_names();
        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_tool_schema_requires_action() {
        let tool = to_tool(&ToolRegistry::tools()[0]);
        assert_eq!(tool.input_schema["required"], serde_json::json!(["action"]));
    }
}
