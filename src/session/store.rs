use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::models::AnswerRecord;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to append answer to {}: {}", .path.display(), .source)]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The append-only answer log for one variant.
///
/// Every write adds exactly one line and never rewrites or truncates prior
/// history. The log is also the only durable record of position: the resume
/// point is recomputed from its content at every session start, so there is
/// no separate checkpoint file to keep in sync.
pub struct AnswerStore {
    path: PathBuf,
}

impl AnswerStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. This is the sole durability checkpoint: once this
    /// returns Ok, the answer survives any interruption.
    pub async fn append(&self, record: &AnswerRecord) -> Result<(), PersistError> {
        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await
            .map_err(|e| self.append_error(e))?;

        let line = format!("{}\n", record.to_line());
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.append_error(e))?;
        file.flush().await.map_err(|e| self.append_error(e))?;

        Ok(())
    }

    fn append_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Append {
            path: self.path.clone(),
            source,
        }
    }

    /// Recompute the resume point from the log alone: the maximum question
    /// index over all valid records, 0 when the log is absent or holds no
    /// valid record. An unreadable log is treated as no prior progress.
    pub async fn resume_index(&self) -> usize {
        if !self.path.exists() {
            return 0;
        }

        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => resume_index_in(&content),
            Err(e) => {
                warn!(
                    "Could not read answer log {}: {}; starting from the beginning",
                    self.path.display(),
                    e
                );
                0
            }
        }
    }

    /// All valid records in write order. Malformed lines are skipped.
    pub async fn records(&self) -> Vec<AnswerRecord> {
        if !self.path.exists() {
            return Vec::new();
        }

        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read answer log {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match AnswerRecord::parse_line(line) {
                Some(record) => records.push(record),
                None => debug!("Skipping malformed answer line: {}", line),
            }
        }
        records
    }
}

/// Maximum valid record index in raw log content; 0 when nothing parses.
/// Stored indices are 0-based question positions, so the value returned here
/// is used directly as the next question to present.
pub fn resume_index_in(content: &str) -> usize {
    content
        .lines()
        .filter_map(AnswerRecord::parse_line)
        .map(|record| record.index)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> AnswerStore {
        AnswerStore::new(tmp.path().join("answers.txt"))
    }

    #[tokio::test]
    async fn append_creates_the_log_and_writes_one_line() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store
            .append(&AnswerRecord::new(0, "1. A?", "alpha"))
            .await
            .unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "0;1. A?;alpha\n");
    }

    #[tokio::test]
    async fn append_never_truncates_prior_history() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store
            .append(&AnswerRecord::new(0, "1. A?", "alpha"))
            .await
            .unwrap();

        // A fresh store over the same path, as a later run would open it.
        let reopened = store_in(&tmp);
        reopened
            .append(&AnswerRecord::new(1, "2. B?", "beta"))
            .await
            .unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content, "0;1. A?;alpha\n1;2. B?;beta\n",
            "append: reopening the log must not discard earlier records"
        );
    }

    #[tokio::test]
    async fn append_to_unwritable_path_returns_persist_error() {
        let tmp = TempDir::new().unwrap();
        // The temp dir itself is not a writable file target.
        let store = AnswerStore::new(tmp.path().to_path_buf());

        let result = store.append(&AnswerRecord::new(0, "q", "a")).await;
        assert!(matches!(result, Err(PersistError::Append { .. })));
    }

    #[tokio::test]
    async fn resume_index_missing_log_returns_zero() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(store_in(&tmp).resume_index().await, 0);
    }

    #[tokio::test]
    async fn resume_index_is_the_max_index_not_the_record_count() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(store.path(), "2;c;C\n0;a;A\n1;b;B\n").unwrap();

        assert_eq!(
            store.resume_index().await,
            2,
            "resume_index: write order must not matter, only the max index"
        );
    }

    #[tokio::test]
    async fn resume_index_skips_malformed_lines() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(
            store.path(),
            "garbage\n0;a;A\n\nnot-a-number;b;B\n3;c;C\nmissing separators\n",
        )
        .unwrap();

        assert_eq!(store.resume_index().await, 3);
    }

    #[tokio::test]
    async fn resume_index_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(store.path(), "0;a;A\n5;f;F\n").unwrap();

        let first = store.resume_index().await;
        let second = store.resume_index().await;
        assert_eq!(first, 5);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn records_round_trip_preserves_semicolons_in_answers() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let record = AnswerRecord::new(4, "5. What matters?", "family; friends; health");
        store.append(&record).await.unwrap();

        let records = store.records().await;
        assert_eq!(records, vec![record]);
    }

    #[tokio::test]
    async fn records_skips_malformed_lines() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(store.path(), "0;a;A\nbroken line\n1;b;B\n").unwrap();

        let records = store.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].index, 1);
    }

    #[test]
    fn resume_index_in_empty_content_is_zero() {
        assert_eq!(resume_index_in(""), 0);
        assert_eq!(resume_index_in("\n\n"), 0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn arbitrary_record() -> impl Strategy<Value = AnswerRecord> {
        (
            0usize..600,
            "[A-Za-z0-9?]([A-Za-z0-9 ?]{0,30}[A-Za-z0-9?])?",
            "[A-Za-z0-9;?]([A-Za-z0-9 ;?]{0,30}[A-Za-z0-9;?])?",
        )
            .prop_map(|(index, question, answer)| AnswerRecord::new(index, question, answer))
    }

    proptest! {
        #[test]
        fn resume_index_in_reports_the_max_valid_index(
            indices in prop::collection::vec(0usize..1000, 1..30),
            junk in prop::collection::vec("[^;\n]{0,20}", 0..10)
        ) {
            let mut lines: Vec<String> = indices
                .iter()
                .map(|i| format!("{};question;answer", i))
                .collect();
            // Separator-free lines can never parse as records.
            lines.extend(junk);

            let content = lines.join("\n");
            prop_assert_eq!(resume_index_in(&content), *indices.iter().max().unwrap());
        }

        #[test]
        fn log_line_round_trip_recovers_the_record(record in arbitrary_record()) {
            let parsed = AnswerRecord::parse_line(&record.to_line()).unwrap();
            prop_assert_eq!(parsed, record);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn store_recovers_every_appended_record(
            records in prop::collection::vec(arbitrary_record(), 1..20)
        ) {
            tokio_test::block_on(async {
                let tmp = TempDir::new().unwrap();
                let store = AnswerStore::new(tmp.path().join("answers.txt"));

                for record in &records {
                    store.append(record).await.unwrap();
                }

                let loaded = store.records().await;
                assert_eq!(loaded, records);

                let expected = records.iter().map(|r| r.index).max().unwrap_or(0);
                assert_eq!(store.resume_index().await, expected);
            });
        }
    }
}
