//! Appends one CSV row per completed analysis.
//!
//! The header row is written whenever the file is empty, so reopening the
//! log across restarts never duplicates it. Appends within this process are
//! serialized by a mutex so concurrent requests can't interleave rows.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::models::AnalysisResult;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Log file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Log writer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One persisted row. Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Transcript")]
    pub transcript: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
}

impl LogRecord {
    pub fn new(transcript: &str, result: &AnalysisResult) -> Self {
        Self {
            transcript: transcript.to_string(),
            summary: result.summary.clone(),
            sentiment: result.sentiment.clone(),
        }
    }
}

#[derive(Debug)]
pub struct TranscriptLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TranscriptLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown to users, without the directory part.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Appends exactly one row, preceded by the header if the file is new or empty.
    pub fn append(&self, record: &LogRecord) -> Result<(), LogError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Runs `append` on the blocking pool so request tasks never block on disk.
    pub async fn append_async(self: &Arc<Self>, record: LogRecord) -> Result<(), LogError> {
        let log = Arc::clone(self);
        tokio::task::spawn_blocking(move || log.append(&record)).await?
    }
}
