//! Gemini vision module — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use gemini_vision_module::config::build_camera_registry;
use gemini_vision_module::protocol::VisionHandler;
use gemini_vision_module::transport::StdioTransport;
use gemini_vision_module::{MODEL_TRIPLET, SERVED_METHODS};

#[derive(Parser)]
#[command(
    name = "gemini-vision-module",
    about = "Vision service module backed by Gemini — JSON-RPC over stdio",
    version
)]
struct Cli {
    /// File-backed camera for local runs, as name=path. Repeatable.
    #[arg(long = "camera")]
    cameras: Vec<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the vision service over stdio (default).
    Serve {
        /// File-backed camera for local runs, as name=path. Repeatable.
        #[arg(long = "camera")]
        cameras: Vec<String>,
    },

    /// Print module capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    // Stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve { cameras: vec![] }) {
        Commands::Serve { cameras } => {
            let specs = if cameras.is_empty() {
                cli.cameras
            } else {
                cameras
            };
            let registry = build_camera_registry(&specs)?;
            if registry.is_empty() {
                tracing::info!("no local cameras registered, expecting host-injected dependencies");
            } else {
                tracing::info!(cameras = ?registry.names(), "registered local cameras");
            }
            let handler = VisionHandler::new(registry);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let info = serde_json::json!({
                "model": MODEL_TRIPLET,
                "api": "rdk:service:vision",
                "methods": SERVED_METHODS,
                "method_count": SERVED_METHODS.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                shell,
                &mut cmd,
                "gemini-vision-module",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
