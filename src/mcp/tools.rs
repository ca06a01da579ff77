//! MCP tool definitions for ideabank

use serde_json::json;

use super::protocol::ToolDefinition;

/// All tool definitions: (name, description, input schema)
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        "add_project_idea",
        "Record a new project idea with scoring fields. Total score and tier are computed automatically.",
        r#"{
            "type": "object",
            "properties": {
                "project_name": {"type": "string", "description": "Name of the project idea"},
                "category": {"type": "string", "description": "Category the idea belongs to"},
                "priority_level": {"type": "integer", "minimum": 1, "maximum": 4, "default": 1, "description": "Priority (higher is more important)"},
                "size_score": {"type": "integer", "minimum": 1, "maximum": 3, "default": 1, "description": "Estimated size of the effort"},
                "business_impact": {"type": "integer", "minimum": 1, "maximum": 4, "default": 1, "description": "Expected business impact"},
                "resource_type": {"type": "integer", "minimum": 1, "maximum": 3, "default": 1, "description": "1=Internal, 2=External, 3=Mixed"},
                "risk_level": {"type": "integer", "minimum": 1, "maximum": 3, "default": 1, "description": "Risk (higher is riskier)"},
                "project_phase": {"type": "string", "enum": ["Planning", "In Progress", "On Hold", "Completed"], "default": "Planning"},
                "notes": {"type": "string", "description": "Free-form notes", "default": ""}
            },
            "required": ["project_name", "category"]
        }"#,
    ),
    (
        "get_project_ideas",
        "Query stored project ideas. All filters are optional and combined with AND; no filters returns everything.",
        r#"{
            "type": "object",
            "properties": {
                "project_name": {"type": "string", "description": "Case-sensitive substring match on the project name"},
                "category": {"type": "string", "description": "Exact category match"},
                "project_tier": {"type": "integer", "enum": [1, 2, 3], "description": "Exact tier match"},
                "project_phase": {"type": "string", "enum": ["Planning", "In Progress", "On Hold", "Completed"], "description": "Exact phase match"}
            }
        }"#,
    ),
    (
        "generate_project_artifact",
        "Produce the dashboard artifact: all ideas ordered by priority then total score, portfolio summary statistics, and visualization instructions.",
        r#"{
            "type": "object",
            "properties": {
                "view_type": {"type": "string", "enum": ["all", "priority", "category", "phase"], "default": "all", "description": "Requested view, forwarded to the renderer"}
            }
        }"#,
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}
