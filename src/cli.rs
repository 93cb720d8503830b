use clap::{Parser, Subcommand};

use crate::commands::{run, status, variants};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Administer resumable long-form questionnaires in the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start or resume a questionnaire session
    Run(run::Args),

    /// Display progress for a questionnaire variant
    Status(status::Args),

    /// List configured question-set variants and their availability
    Variants(variants::Args),
}
