//! md3obj CLI - Command-line interface for MD3 model conversion

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "md3obj")]
#[command(version = crate::VERSION)]
#[command(about = "md3obj: convert Quake III MD3 models to Wavefront OBJ", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the md3obj CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
