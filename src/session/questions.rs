use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Question;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Question file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read question file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No questions found after filtering blank lines")]
    Empty,
}

/// The ordered question list for one variant. Loaded once per session and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a question set from raw file content. Blank and whitespace-only
    /// lines are discarded; the order of surviving lines is preserved.
    pub fn from_content(content: &str) -> Result<Self, LoadError> {
        let questions: Vec<Question> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Question::new)
            .collect();

        if questions.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self { questions })
    }

    pub async fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::Missing(path.to_path_buf()));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_content(&content)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn from_content_keeps_every_non_blank_line_in_order() {
        let set = QuestionSet::from_content("1. A?\n2. B?\n3. C?\n").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0).unwrap().text(), "1. A?");
        assert_eq!(set.get(2).unwrap().text(), "3. C?");
    }

    #[test]
    fn from_content_discards_blank_and_whitespace_lines() {
        let set = QuestionSet::from_content("First?\n\n   \n\t\nSecond?\n").unwrap();
        assert_eq!(
            set.len(),
            2,
            "from_content: blank and whitespace-only lines should be discarded"
        );
        assert_eq!(set.get(1).unwrap().text(), "Second?");
    }

    #[test]
    fn from_content_empty_input_is_an_error() {
        assert!(matches!(
            QuestionSet::from_content(""),
            Err(LoadError::Empty)
        ));
        assert!(matches!(
            QuestionSet::from_content("\n  \n\n"),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn get_out_of_range_returns_none() {
        let set = QuestionSet::from_content("Only one?\n").unwrap();
        assert!(set.get(1).is_none());
    }

    #[tokio::test]
    async fn load_missing_file_returns_missing() {
        let tmp = TempDir::new().unwrap();
        let result = QuestionSet::load(&tmp.path().join("nope.txt")).await;
        assert!(matches!(result, Err(LoadError::Missing(_))));
    }

    #[tokio::test]
    async fn load_reads_and_filters_file_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("questions.txt");
        std::fs::write(&path, "1. First?\n\n2. Second?\n").unwrap();

        let set = QuestionSet::load(&path).await.unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().display_text(), "First?");
    }

    #[tokio::test]
    async fn load_empty_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("questions.txt");
        std::fs::write(&path, "\n\n").unwrap();

        assert!(matches!(
            QuestionSet::load(&path).await,
            Err(LoadError::Empty)
        ));
    }
}
