use serde::{Deserialize, Serialize};

/// Summary used when a parsed reply has no usable `summary` field.
pub const DEFAULT_SUMMARY: &str = "No summary available";
/// Sentiment used when a parsed reply has no usable `sentiment` field.
pub const DEFAULT_SENTIMENT: &str = "Neutral";
/// Summary used when no structured object could be recovered at all.
pub const FALLBACK_SUMMARY: &str = "Failed to parse summary from response";

/// Structured result extracted from a model reply. Both fields are trimmed
/// and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub sentiment: String,
}

/// The three canonical sentiment labels the prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    /// Case-insensitive match against the canonical labels.
    pub fn from_label(label: &str) -> Option<Self> {
        [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative]
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

/// How extracted sentiment labels are treated before they are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SentimentPolicy {
    /// Any non-empty label is returned as the model wrote it.
    #[default]
    PassThrough,
    /// Labels are canonicalised; anything outside the closed set becomes Neutral.
    Strict,
}

impl SentimentPolicy {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            SentimentPolicy::Strict
        } else {
            SentimentPolicy::PassThrough
        }
    }

    pub fn apply(self, label: String) -> String {
        match self {
            SentimentPolicy::PassThrough => label,
            SentimentPolicy::Strict => Sentiment::from_label(&label)
                .unwrap_or(Sentiment::Neutral)
                .as_str()
                .to_string(),
        }
    }
}

/// Request body for `POST /analyze` and form body for `POST /analyze-form`.
#[derive(Debug, Deserialize)]
pub struct TranscriptIn {
    pub transcript: String,
}

/// Success payload returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResponse {
    pub transcript: String,
    pub summary: String,
    pub sentiment: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}
