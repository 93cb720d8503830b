use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use std::path::PathBuf;

use crate::config::Config;

#[derive(ClapArgs)]
pub struct Args {
    /// Directory holding question and answer files (default: current directory)
    #[arg(default_value = ".")]
    pub data_dir: PathBuf,

    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub async fn execute(args: Args) -> Result<()> {
    let data_dir = args
        .data_dir
        .canonicalize()
        .context("Failed to resolve data directory")?;

    let config = Config::load(args.config)?.with_data_dir(data_dir);

    println!("Configured variants (data dir: {}):", config.data_dir.display());
    println!();

    for variant in &config.variants {
        let question_file = config.question_file(variant);
        let availability = if question_file.exists() {
            "available"
        } else {
            "missing"
        };
        let progress = if config.answer_file(variant).exists() {
            "  [in progress]"
        } else {
            ""
        };

        println!(
            "  {:<12} {:<10} {}{}",
            variant.name,
            availability,
            question_file.display(),
            progress
        );
    }

    Ok(())
}
