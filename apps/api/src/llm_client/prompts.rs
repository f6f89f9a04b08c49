// Prompt template for call transcript analysis.

/// System instruction sent with every analysis request.
pub const CALL_ANALYSIS_SYSTEM: &str = "You are a concise assistant specialized in \
    summarizing customer call transcripts. \
    Return valid JSON with keys: 'summary' (2-3 sentences) and 'sentiment' \
    (Positive, Neutral, Negative).";

/// User message template. `{transcript}` is replaced with the caller's text.
pub const CALL_ANALYSIS_PROMPT: &str = "Transcript:\n{transcript}\n\nReturn the JSON described above.";

pub fn build_user_prompt(transcript: &str) -> String {
    CALL_ANALYSIS_PROMPT.replace("{transcript}", transcript)
}
