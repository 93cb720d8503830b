/// Sentinel recorded when the user explicitly skips a question.
pub const SKIPPED_ANSWER: &str = "[SKIPPED]";

/// One persisted answer, encoded on the log as `index;question;answer`.
///
/// The answer field is not escaped: it may itself contain `;` because only
/// the first two separators are significant when parsing. The question field
/// cannot carry an unambiguous `;` under this format. Input is read
/// line-by-line, so neither field ever contains `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub index: usize,
    pub question: String,
    pub answer: String,
}

impl AnswerRecord {
    pub fn new(index: usize, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            index,
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Encode as one log line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{};{};{}", self.index, self.question, self.answer)
    }

    /// Parse one log line. Returns `None` for blank lines, lines with fewer
    /// than three fields, or a non-integer index; callers skip those.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut parts = line.splitn(3, ';');
        let index = parts.next()?.trim().parse::<usize>().ok()?;
        let question = parts.next()?;
        let answer = parts.next()?;

        Some(Self::new(index, question, answer))
    }
}
