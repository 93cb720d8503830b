use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod models;
mod session;
mod utils;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::execute(args).await,
        Commands::Status(args) => commands::status::execute(args).await,
        Commands::Variants(args) => commands::variants::execute(args).await,
    }
}
