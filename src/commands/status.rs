use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use clap::Args as ClapArgs;
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::{Config, VariantConfig};
use crate::session::{AnswerStore, QuestionSet};
use crate::utils::truncate_str;

#[derive(ClapArgs)]
pub struct Args {
    /// Directory holding question and answer files (default: current directory)
    #[arg(default_value = ".")]
    pub data_dir: PathBuf,

    /// Variant to report on (default: the single variant with an answer log)
    #[arg(short, long)]
    pub variant: Option<String>,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,

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
    let variant = resolve_variant(&config, args.variant.as_deref())?;

    let question_path = config.question_file(&variant);
    let questions = QuestionSet::load(&question_path)
        .await
        .with_context(|| format!("Failed to load questions from {}", question_path.display()))?;

    let store = AnswerStore::new(config.answer_file(&variant));
    let records = store.records().await;
    let resume_index = store.resume_index().await;

    let total = questions.len();
    let answered: HashSet<usize> = records.iter().map(|r| r.index).collect();
    let distinct = answered.len().min(total);
    let percent = distinct * 100 / total;

    let next_question = questions
        .get(resume_index)
        .map(|q| q.display_text().to_string());

    let last_activity: Option<DateTime<Local>> = std::fs::metadata(store.path())
        .ok()
        .and_then(|m| m.modified().ok())
        .map(DateTime::<Local>::from);

    if args.json {
        let payload = json!({
            "variant": variant.name,
            "questions": total,
            "records": records.len(),
            "answered": distinct,
            "percent_complete": percent,
            "resume_index": resume_index,
            "next_question": next_question,
            "answer_file": store.path().display().to_string(),
            "last_activity": last_activity.map(|t| t.to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Variant: {}", variant.name);
    println!("Questions: {}", total);
    println!("Answer records: {}", records.len());
    println!("Questions answered: {} ({}%)", distinct, percent);
    match &next_question {
        Some(q) => println!("Next question ({}): {}", resume_index + 1, truncate_str(q, 60)),
        None => println!("Next question: none, the questionnaire is complete"),
    }
    if let Some(t) = last_activity {
        println!("Last activity: {}", t.format("%Y-%m-%d %H:%M:%S"));
    }
    println!("Answer file: {}", store.path().display());

    Ok(())
}

/// Pick the variant to report on: an explicit name wins; otherwise exactly
/// one variant with an answer log on disk is accepted, anything else asks
/// the user to disambiguate.
fn resolve_variant(config: &Config, requested: Option<&str>) -> Result<VariantConfig> {
    if let Some(name) = requested {
        return match config.variant(name) {
            Some(v) => Ok(v.clone()),
            None => bail!("Unknown variant: {}", name),
        };
    }

    let in_progress: Vec<&VariantConfig> = config
        .variants
        .iter()
        .filter(|v| config.answer_file(v).exists())
        .collect();

    match in_progress.len() {
        0 => bail!(
            "No answer logs found in {}. Specify a variant with --variant.",
            config.data_dir.display()
        ),
        1 => Ok(in_progress[0].clone()),
        _ => {
            eprintln!("Multiple variants have answer logs. Please specify one with --variant:");
            for variant in &in_progress {
                eprintln!(
                    "  {} - {}",
                    variant.name,
                    config.answer_file(variant).display()
                );
            }
            bail!("Multiple variants in progress, please specify one")
        }
    }
}
