use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use std::path::PathBuf;

use crate::config::{Config, VariantConfig};
use crate::session::{
    AnswerInput, AnswerStore, ConsolePrompt, QuestionSet, SessionEngine, SessionOutcome,
};

#[derive(ClapArgs)]
pub struct Args {
    /// Directory holding question and answer files (default: current directory)
    #[arg(default_value = ".")]
    pub data_dir: PathBuf,

    /// Question-set variant to run (skips the selection menu)
    #[arg(short, long)]
    pub variant: Option<String>,

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

    print_welcome();

    let mut prompt = ConsolePrompt::new();

    let variant = match args.variant {
        Some(name) => match config.variant(&name) {
            Some(v) => v.clone(),
            None => bail!(
                "Unknown variant: {}. Run 'intake variants' to list configured variants.",
                name
            ),
        },
        None => match choose_variant(&config, &mut prompt).await? {
            Some(v) => v,
            None => {
                println!("\nNo variant selected. Nothing was changed.");
                return Ok(());
            }
        },
    };

    let question_path = config.question_file(&variant);
    let questions = QuestionSet::load(&question_path)
        .await
        .with_context(|| format!("Failed to load questions from {}", question_path.display()))?;

    println!("Loaded {} questions.", questions.len());

    let store = AnswerStore::new(config.answer_file(&variant));
    let answers_path = store.path().to_path_buf();
    let resume_index = store.resume_index().await;

    println!();
    if resume_index > 0 {
        println!("RESUMING SESSION");
        println!("You have already answered {} questions.", resume_index);
        println!("Starting from question {}...", resume_index + 1);
    } else {
        println!("STARTING NEW SESSION");
        println!("Beginning with question 1 of {}...", questions.len());
    }
    println!("Answers will be saved to: {}", answers_path.display());

    print_instructions();

    match prompt.read_line("\nPress ENTER to begin...").await? {
        AnswerInput::Line(_) => {}
        AnswerInput::Interrupted | AnswerInput::EndOfInput => {
            println!("\nSession not started. Your progress is unchanged.");
            return Ok(());
        }
    }

    let mut engine = SessionEngine::new(questions, store, prompt, resume_index);
    let outcome = engine.run().await?;

    println!();
    match outcome {
        SessionOutcome::Completed => {
            println!("QUESTIONNAIRE COMPLETE");
            println!("Your responses are saved in: {}", answers_path.display());
        }
        SessionOutcome::QuitByUser { resume_at } => {
            println!(
                "Session saved. You can resume from question {} next time.",
                resume_at + 1
            );
        }
        SessionOutcome::Interrupted { resume_at } => {
            println!(
                "Session interrupted. Progress is saved; resume from question {} next time.",
                resume_at + 1
            );
        }
    }

    Ok(())
}

async fn choose_variant(
    config: &Config,
    prompt: &mut ConsolePrompt,
) -> Result<Option<VariantConfig>> {
    loop {
        let available = config.available_variants();
        if available.is_empty() {
            bail!(
                "No question files found in {}. Expected files named {}<suffix>.txt",
                config.data_dir.display(),
                config.question_prefix
            );
        }

        println!();
        println!("AVAILABLE QUESTION SETS:");
        println!("{}", "-".repeat(30));
        for (i, variant) in available.iter().enumerate() {
            println!("{:2}. {}", i + 1, variant.name);
        }
        println!("{}", "-".repeat(30));

        let line = match prompt
            .read_line("\nEnter the number of your choice: ")
            .await?
        {
            AnswerInput::Line(line) => line,
            AnswerInput::Interrupted | AnswerInput::EndOfInput => return Ok(None),
        };

        match line.trim().parse::<usize>() {
            Ok(n) if (1..=available.len()).contains(&n) => {
                let variant = available[n - 1].clone();
                println!("Selected: {}", variant.name);
                return Ok(Some(variant));
            }
            _ => println!("Invalid choice. Please enter a number from the list."),
        }
    }
}

fn print_welcome() {
    println!("{}", "=".repeat(60));
    println!("WELCOME TO THE QUESTIONNAIRE SYSTEM");
    println!("{}", "=".repeat(60));
    println!();
    println!("This tool guides you through a long-form questionnaire,");
    println!("one question at a time.");
    println!();
    println!("You can stop at any time and resume later where you left off.");
    println!("Every answer is saved the moment you give it.");
    println!("{}", "=".repeat(60));
}

fn print_instructions() {
    println!();
    println!("{}", "=".repeat(60));
    println!("INSTRUCTIONS:");
    println!("- Answer each question in as much detail as you like");
    println!("- Type 'QUIT' at any time to stop; your progress is kept");
    println!("- Type 'SKIP' to skip a question");
    println!("- Every answer is saved immediately");
    println!("{}", "=".repeat(60));
}
