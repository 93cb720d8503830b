use anyhow::Result;
use tracing::{error, warn};

use crate::models::{AnswerRecord, SKIPPED_ANSWER};
use crate::session::prompt::{AnswerInput, ConsolePrompt, PromptIo};
use crate::session::questions::QuestionSet;
use crate::session::store::AnswerStore;

/// Terminal outcome of a session run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every remaining question was answered, or none were left to ask.
    Completed,
    /// The user typed QUIT; nothing was recorded for the question at
    /// `resume_at`, which is where the next run picks up.
    QuitByUser { resume_at: usize },
    /// An interrupt arrived while waiting for input.
    Interrupted { resume_at: usize },
}

enum QuestionStep {
    Answered,
    Stopped(SessionOutcome),
}

/// Runs the question loop for one session.
///
/// The engine is an explicit session context: the loaded question set, the
/// resume index derived from the answer log, the store, and the prompt seam
/// all live here rather than in ambient state, so each piece can be driven
/// in isolation from tests.
///
/// Each question is an independent, immediately durable unit: the answer is
/// appended to the log before the loop advances, and stopping (quit or
/// interrupt) can only happen while awaiting input, never mid-write.
pub struct SessionEngine<P: PromptIo = ConsolePrompt> {
    questions: QuestionSet,
    store: AnswerStore,
    prompt: P,
    resume_index: usize,
}

impl<P: PromptIo> SessionEngine<P> {
    pub fn new(questions: QuestionSet, store: AnswerStore, prompt: P, resume_index: usize) -> Self {
        Self {
            questions,
            store,
            prompt,
            resume_index,
        }
    }

    /// Iterate from the resume index through the last question, stopping
    /// early the moment the user quits or an interrupt arrives.
    ///
    /// A resume index at or past the end of the question set is a valid
    /// degenerate completion: there is nothing left to ask. It can only
    /// arise when the log references questions beyond the loaded set, which
    /// means the question file changed between runs.
    pub async fn run(&mut self) -> Result<SessionOutcome> {
        if self.resume_index >= self.questions.len() {
            if self.resume_index > 0 {
                warn!(
                    "Answer log references question index {} but only {} questions are loaded; nothing left to ask",
                    self.resume_index,
                    self.questions.len()
                );
            }
            return Ok(SessionOutcome::Completed);
        }

        for index in self.resume_index..self.questions.len() {
            match self.ask_question(index).await? {
                QuestionStep::Answered => {}
                QuestionStep::Stopped(outcome) => return Ok(outcome),
            }
        }

        Ok(SessionOutcome::Completed)
    }

    /// Present one question and loop until it is resolved.
    ///
    /// The displayed text has the legacy numeric prefix stripped; the
    /// persisted record always carries the original unstripped text. On the
    /// trimmed input line: QUIT (any case) stops without saving, SKIP (any
    /// case) records the skip sentinel, an empty line re-prompts, and
    /// anything else is recorded verbatim.
    async fn ask_question(&mut self, index: usize) -> Result<QuestionStep> {
        let question = match self.questions.get(index) {
            Some(question) => question,
            None => return Ok(QuestionStep::Answered),
        };

        self.prompt
            .present_question(index, self.questions.len(), question.display_text());

        loop {
            match self.prompt.read_answer().await? {
                AnswerInput::Interrupted => {
                    return Ok(QuestionStep::Stopped(SessionOutcome::Interrupted {
                        resume_at: index,
                    }));
                }
                AnswerInput::EndOfInput => {
                    return Ok(QuestionStep::Stopped(SessionOutcome::QuitByUser {
                        resume_at: index,
                    }));
                }
                AnswerInput::Line(raw) => {
                    let trimmed = raw.trim();

                    if trimmed.eq_ignore_ascii_case("quit") {
                        return Ok(QuestionStep::Stopped(SessionOutcome::QuitByUser {
                            resume_at: index,
                        }));
                    }

                    if trimmed.is_empty() {
                        self.prompt.notify(
                            "Please provide an answer, type 'SKIP' to skip, or 'QUIT' to exit.",
                        );
                        continue;
                    }

                    let answer = if trimmed.eq_ignore_ascii_case("skip") {
                        SKIPPED_ANSWER
                    } else {
                        trimmed
                    };

                    let record = AnswerRecord::new(index, question.text(), answer);
                    match self.store.append(&record).await {
                        Ok(()) => self.prompt.notify("Answer saved."),
                        Err(e) => {
                            error!("{}", e);
                            self.prompt
                                .notify(&format!("Could not save this answer: {e}"));
                        }
                    }

                    return Ok(QuestionStep::Answered);
                }
            }
        }
    }
}
