mod question;
mod record;

pub use question::Question;
pub use record::{AnswerRecord, SKIPPED_ANSWER};
