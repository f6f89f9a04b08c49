//! Analyzer — builds the prompt, calls the completion transport once and
//! runs the reply through the extraction ladder.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::extract::{extract, Extraction, Stage};
use crate::analysis::models::{AnalysisResult, SentimentPolicy};
use crate::llm_client::prompts::{build_user_prompt, CALL_ANALYSIS_SYSTEM};
use crate::llm_client::{CompletionTransport, LlmError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Empty transcript.")]
    EmptyInput,

    #[error("Completion API error: {0}")]
    Upstream(#[from] LlmError),

    #[error("Could not parse completion API response.")]
    ResponseMissing,
}

#[derive(Clone)]
pub struct Analyzer {
    transport: Arc<dyn CompletionTransport>,
    policy: SentimentPolicy,
}

impl Analyzer {
    pub fn new(transport: Arc<dyn CompletionTransport>, policy: SentimentPolicy) -> Self {
        Self { transport, policy }
    }

    /// Analyzes one transcript. Empty input is rejected before any upstream call.
    pub async fn analyze(&self, transcript: &str) -> Result<AnalysisResult, AnalysisError> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let reply = self
            .transport
            .complete(CALL_ANALYSIS_SYSTEM, &build_user_prompt(transcript))
            .await?;

        let Extraction { result, stage } = extract(reply.as_deref())?;
        match stage {
            Stage::Fallback => warn!(
                "Model reply contained no JSON object; using fallback result ({} chars)",
                reply.as_deref().map_or(0, str::len)
            ),
            _ => debug!("Model reply parsed at stage {:?}", stage),
        }

        Ok(AnalysisResult {
            summary: result.summary,
            sentiment: self.policy.apply(result.sentiment),
        })
    }

    pub async fn list_models(&self) -> Result<Vec<String>, AnalysisError> {
        Ok(self.transport.list_models().await?)
    }
}
