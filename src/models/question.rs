use regex::Regex;

/// A single questionnaire entry.
///
/// Position in the loaded sequence is authoritative. Some question files
/// carry a legacy numeric prefix in the text itself ("12. ..."); that prefix
/// is cosmetic and stripped for display only. The stored text, prefix
/// included, is what gets persisted alongside answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The original text as loaded, prefix included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text shown to the user: a leading run of digits followed by a
    /// period and a single space is stripped, anything else passes through.
    pub fn display_text(&self) -> &str {
        let re = Regex::new(r"^\d+\. ").unwrap();
        match re.find(&self.text) {
            Some(m) => &self.text[m.end()..],
            None => &self.text,
        }
    }
}
