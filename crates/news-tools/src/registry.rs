//! Tool registry for managing available tools

use crate::Tool;
use news_core::{Error, Result};
use news_llm::ToolDefinition;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Registry for managing tools
///
/// Tools keep their registration order so the advertised descriptor list is
/// stable across calls. Registering a tool under an existing name replaces it
/// in place.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            Some(slot) => *slot = tool,
            None => self.tools.push(tool),
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Definitions of all registered tools, in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::InvalidRequest(format!("Unknown tool: {name}")))?;
        debug!(tool = name, "Executing tool");
        tool.execute(params).await
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Constant {
        name: &'static str,
        value: Value,
    }

    #[async_trait]
    impl Tool for Constant {
        async fn execute(&self, _params: Value) -> Result<Value> {
            Ok(self.value.clone())
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "returns a constant"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }
    }

    fn constant(name: &'static str, value: Value) -> Arc<dyn Tool> {
        Arc::new(Constant { name, value })
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(constant("a", json!(1)));
        registry.register(constant("b", json!(2)));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.execute("b", json!({})).await.unwrap(), json!(2));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_reregister_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(constant("a", json!(1)));
        registry.register(constant("b", json!(2)));
        registry.register(constant("a", json!(3)));

        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(registry.execute("a", json!({})).await.unwrap(), json!(3));
    }
}
