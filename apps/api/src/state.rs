use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::config::Config;
use crate::transcript_log::TranscriptLog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    /// Single shared log so appends from concurrent requests are serialized.
    pub log: Arc<TranscriptLog>,
    pub config: Config,
}
