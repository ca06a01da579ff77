//! ideabank - project idea tracker
//!
//! MCP tool server backed by SQLite: record, query, and score project ideas,
//! and produce an aggregated artifact payload for dashboard rendering.

pub mod error;
pub mod mcp;
pub mod storage;
pub mod types;

pub use error::{Result, TrackerError};
pub use storage::Storage;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
