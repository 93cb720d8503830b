use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// One read from the interactive stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    Line(String),
    /// An interrupt signal arrived while waiting for input.
    Interrupted,
    /// The stream closed; no further input will arrive.
    EndOfInput,
}

/// The engine's only window to the user: render a question, surface notices,
/// and block until the next line of input. Interrupts are reported as a
/// value rather than tearing the session down, so the engine can guarantee
/// it never stops mid-write.
#[async_trait]
pub trait PromptIo: Send {
    fn present_question(&mut self, index: usize, total: usize, text: &str);

    fn notify(&mut self, message: &str);

    async fn read_answer(&mut self) -> Result<AnswerInput>;
}

/// Line-oriented terminal prompt over stdin/stdout.
pub struct ConsolePrompt {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print a label and wait for one line, racing the read against Ctrl-C
    /// so cancellation is only ever observed while awaiting input.
    pub async fn read_line(&mut self, label: &str) -> Result<AnswerInput> {
        print!("{label}");
        std::io::stdout().flush()?;

        tokio::select! {
            _ = tokio::signal::ctrl_c() => Ok(AnswerInput::Interrupted),
            line = self.lines.next_line() => match line? {
                Some(line) => Ok(AnswerInput::Line(line)),
                None => Ok(AnswerInput::EndOfInput),
            },
        }
    }
}

#[async_trait]
impl PromptIo for ConsolePrompt {
    fn present_question(&mut self, index: usize, total: usize, text: &str) {
        println!();
        println!("{}", "-".repeat(60));
        println!("Question {} of {}", index + 1, total);
        println!("{}", "-".repeat(60));
        println!("{text}");
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }

    async fn read_answer(&mut self) -> Result<AnswerInput> {
        self.read_line("Your answer: ").await
    }
}
