//! Dockhand CLI - assemble and submit a project deployment configuration

mod commands;

use clap::{Parser, Subcommand};
use commands::{RenderCommand, SubmitCommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DOCKHAND_LOG_LEVEL", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a project configuration to the backend
    Submit(SubmitCommand),
    /// Render the nginx configuration for a settings file
    Render(RenderCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // If RUST_LOG is set, use it directly; otherwise use our default
    // filter with all dockhand crates at the requested level.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .expect("Invalid RUST_LOG environment variable")
    } else {
        tracing_subscriber::EnvFilter::new(format!(
            "dockhand_cli={level},\
             dockhand_core={level},\
             dockhand_session={level},\
             dockhand_submit={level},\
             dockhand_console={level}",
            level = cli.log_level
        ))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Submit(cmd) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cmd.execute())
        }
        Commands::Render(cmd) => cmd.execute(),
    }
}
