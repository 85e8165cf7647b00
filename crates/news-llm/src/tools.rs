//! Tool definition types for LLM tool use

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Tool definition for LLM provider
///
/// This describes a tool that an orchestrating LLM can call, including its
/// name, description, and input schema in JSON Schema format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (must match the tool in ToolRegistry)
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Render as an OpenAI function tool
    ///
    /// `{"type": "function", "function": {"name", "description", "parameters"}}`
    pub fn to_openai_function(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema,
            }
        })
    }
}

/// Helper module to build JSON schemas for tools
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    ///
    /// # Example
    ///
    /// ```
    /// use news_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "coins": schema::array("Ticker symbols", schema::item("string")),
    ///     }),
    ///     vec!["coins"],
    /// );
    /// assert_eq!(schema["required"][0], "coins");
    /// ```
    pub fn object(properties: Value, required: Vec<&str>) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Bare item schema of the given JSON type, for array `items`
    pub fn item(kind: &str) -> Value {
        json!({ "type": kind })
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "items": items,
            "description": description,
        })
    }
}
