//! ideabank MCP server
//!
//! Run with: ideabank-server

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ideabank::error::Result;
use ideabank::mcp::{McpServer, TrackerHandler};
use ideabank::storage::Storage;

#[derive(Parser, Debug)]
#[command(name = "ideabank-server")]
#[command(about = "Project idea tracker MCP server")]
struct Args {
    /// Database path (the dashboard reads the same file)
    #[arg(long, env = "IDEABANK_DB_PATH", default_value = "data/project_tracker.db")]
    db_path: String,
}

fn main() -> Result<()> {
    // Logging goes to stderr; stdout carries the MCP protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let db_path = shellexpand::tilde(&args.db_path).to_string();
    let storage = Storage::open(db_path)?;
    tracing::info!(db_path = storage.db_path(), "idea store opened");

    let handler = TrackerHandler::new(storage);
    let server = McpServer::new(handler);

    tracing::info!("ideabank MCP server starting...");
    server.run()?;

    Ok(())
}
