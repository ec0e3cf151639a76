//! loam-bin - fetch and run the prebuilt loam CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use loam_bin::cmd;
use loam_bin::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Target { json } => cmd::target::target(json),
        Commands::Urls => cmd::urls::urls(&cli.name, &cli.release),
        Commands::Install => cmd::install::install(&cli.name, &cli.release).await,
        Commands::Run { args } => {
            let code = cmd::run::run(&cli.name, &cli.release, &args).await?;
            std::process::exit(code);
        }
    }
}
