mod doctors;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool, INTERNAL_ERROR, INVALID_PARAMS};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Wrap a tool's output as pretty JSON text content
pub fn text_result<T: Serialize>(output: &T) -> Result<serde_json::Value, JsonRpcError> {
    let text = serde_json::to_string_pretty(output)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Serialization error: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "doclist".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "doctors_list".to_string(),
            description: "List doctors from the directory feed, optionally searched by name or specialty, filtered by consultation mode and specialties, and sorted by fees (lowest first) or experience (most first). Filters can be restored from a listing query string; explicit arguments are applied on top of it. Returns the visible doctors, the specialty facets, the doctor count per consultation mode, up to three name suggestions, the filter state and the resulting query string.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Listing query string to restore filters from (e.g., '?consult=In+Clinic&sort=fees')"
                    },
                    "clear": {
                        "type": "boolean",
                        "description": "Reset every filter before applying the other arguments (default: false)"
                    },
                    "search": {
                        "type": "string",
                        "description": "Case-insensitive substring matched against doctor names and specialties"
                    },
                    "consult": {
                        "type": "string",
                        "description": "Consultation mode; an empty string clears it",
                        "enum": ["Video Consult", "In Clinic", ""]
                    },
                    "specialties": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Specialties to filter by (a doctor matching any of them is kept). Replaces the restored selection."
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort order; an empty string restores feed order",
                        "enum": ["fees", "experience", ""]
                    }
                }
            }),
        },
        Tool {
            name: "doctors_specialties".to_string(),
            description: "List the specialties offered in the doctor feed with the number of doctors practising each, sorted alphabetically, plus the number of doctors per consultation mode (Video Consult, In Clinic) and in total.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
        Tool {
            name: "doctors_suggest".to_string(),
            description: "Suggest up to three doctors whose name contains the given term (case-insensitive), in feed order.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "term": {
                        "type": "string",
                        "description": "Part of a doctor's name (e.g., 'an')"
                    }
                },
                "required": ["term"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?;

    match params.name.as_str() {
        "doctors_list" => doctors::handle_doctors_list(params.arguments, global).await,
        "doctors_specialties" => doctors::handle_doctors_specialties(params.arguments, global).await,
        "doctors_suggest" => doctors::handle_doctors_suggest(params.arguments, global).await,
        _ => Err(JsonRpcError::new(
            INVALID_PARAMS,
            format!("Unknown tool: {}", params.name),
        )),
    }
}
