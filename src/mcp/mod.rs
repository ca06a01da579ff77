//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC over stdio for agent tool integration.

pub mod handler;
pub mod protocol;
pub mod tools;

pub use handler::{Tool, TrackerHandler};
pub use protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, McpServer, ToolCallResult,
};
pub use tools::{tool_definitions, TOOL_DEFINITIONS};
