//! Membridge - MCP stdio bridge to a shared-memory HTTP backend
//!
//! Main entry point. Runs the MCP server over stdin/stdout by default;
//! `status` queries the backend's health and stats endpoints instead.

use clap::{Parser, Subcommand};
use membridge_core::{BackendClient, McpServer, Result, Settings, ToolHandler};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "membridge", version, about = "MCP stdio bridge to a shared-memory backend")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MEMBRIDGE_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server on stdin/stdout (default)
    Serve,

    /// Query backend health and memory stats
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is the protocol channel.
    let level = cli.log_level.to_lowercase();
    let filter = EnvFilter::new(format!("membridge={},membridge_core={}", level, level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("membridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()?;
    let backend = BackendClient::new(settings)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Backend: {}", backend.backend_url());
            let server = McpServer::new(ToolHandler::new(backend));
            server.run().await
        }
        Commands::Status => {
            let health = backend.health().await?;
            let stats = backend.stats().await?;

            println!("Backend: {}", backend.backend_url());
            println!("{}", serde_json::to_string_pretty(&health)?);
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
    }
}
