//! RosePetal CLI - inspect ROSE Online assets and dry-run terrain assembly

mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "rosepetal")]
#[command(about = "RosePetal: ROSE Online asset tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()
}
