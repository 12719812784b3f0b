// gameplan/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug gameplan validate ... pour voir les détails.
    // stderr: stdout reste propre pour --format json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: VALIDATE UPLOADS ---
        Commands::Validate {
            reference,
            input,
            project_dir,
            limit,
            format,
            output,
        } => {
            commands::validate::execute(commands::validate::ValidateArgs {
                reference,
                input,
                project_dir,
                limit,
                format,
                output,
            })
            .await?
        }

        // --- USE CASE: INSPECT REFERENCE DATA ---
        Commands::Inspect { reference, check } => {
            commands::inspect::execute(reference, check).await?
        }
    }

    Ok(())
}
