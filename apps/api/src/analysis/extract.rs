//! Recovers summary and sentiment from a model's free-text reply.
//!
//! Stages are tried in order and the first one that yields a JSON object wins:
//! 1. `parse_direct`: the whole trimmed reply is a JSON object.
//! 2. `parse_embedded`: the span from the first `{` to the last `}` is one.
//! 3. fixed fallback, which never fails.
//!
//! Only a reply with no text at all is an error; blank or garbled text
//! still degrades to the fallback.

use serde_json::{Map, Value};

use crate::analysis::analyzer::AnalysisError;
use crate::analysis::models::{
    AnalysisResult, DEFAULT_SENTIMENT, DEFAULT_SUMMARY, FALLBACK_SUMMARY,
};

/// Which stage of the ladder produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Direct,
    Embedded,
    Fallback,
}

/// Fields pulled out of a recovered JSON object. `None` means absent,
/// null, or not a string.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RawFields {
    pub summary: Option<String>,
    pub sentiment: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Extraction {
    pub result: AnalysisResult,
    pub stage: Stage,
}

type StageFn = fn(&str) -> Option<RawFields>;

const LADDER: [(Stage, StageFn); 2] = [
    (Stage::Direct, parse_direct),
    (Stage::Embedded, parse_embedded),
];

pub fn extract(reply: Option<&str>) -> Result<Extraction, AnalysisError> {
    let text = reply
        .filter(|t| !t.is_empty())
        .ok_or(AnalysisError::ResponseMissing)?;

    let extraction = LADDER
        .iter()
        .find_map(|(stage, parse)| {
            parse(text).map(|fields| Extraction {
                result: with_defaults(fields),
                stage: *stage,
            })
        })
        .unwrap_or_else(|| Extraction {
            result: fallback(),
            stage: Stage::Fallback,
        });

    Ok(extraction)
}

/// Stage 1: the trimmed reply is itself a JSON object.
pub fn parse_direct(text: &str) -> Option<RawFields> {
    parse_object(text.trim())
}

/// Stage 2: a JSON object wrapped in prose, taken from the first `{` to the
/// last `}` inclusive.
pub fn parse_embedded(text: &str) -> Option<RawFields> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    parse_object(&text[start..=end])
}

/// Stage 3.
pub fn fallback() -> AnalysisResult {
    AnalysisResult {
        summary: FALLBACK_SUMMARY.to_string(),
        sentiment: DEFAULT_SENTIMENT.to_string(),
    }
}

fn parse_object(candidate: &str) -> Option<RawFields> {
    let object: Map<String, Value> = serde_json::from_str(candidate).ok()?;
    Some(RawFields {
        summary: string_field(&object, "summary"),
        sentiment: string_field(&object, "sentiment"),
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(String::from)
}

fn with_defaults(fields: RawFields) -> AnalysisResult {
    AnalysisResult {
        summary: trimmed_or(fields.summary, DEFAULT_SUMMARY),
        sentiment: trimmed_or(fields.sentiment, DEFAULT_SENTIMENT),
    }
}

fn trimmed_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
