use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use tracing::info;

use crate::analysis::models::{AnalysisResponse, ModelsResponse, TranscriptIn};
use crate::errors::AppError;
use crate::render::{error_page, result_page, FORM_PAGE};
use crate::state::AppState;
use crate::transcript_log::LogRecord;

/// Full flow for one submission: analyze, then record, then answer.
/// Nothing is written to the log unless analysis succeeded.
pub async fn analyze_and_record(
    state: &AppState,
    transcript: &str,
) -> Result<AnalysisResponse, AppError> {
    let transcript = transcript.trim();
    let result = state.analyzer.analyze(transcript).await?;

    info!(
        "Analyzed transcript ({} chars): summary={:?} sentiment={}",
        transcript.chars().count(),
        result.summary,
        result.sentiment
    );

    state
        .log
        .append_async(LogRecord::new(transcript, &result))
        .await?;

    Ok(AnalysisResponse {
        transcript: transcript.to_string(),
        summary: result.summary,
        sentiment: result.sentiment,
    })
}

/// GET /
pub async fn handle_form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
}

/// POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<TranscriptIn>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let response = analyze_and_record(&state, &req.transcript).await?;
    Ok(Json(response))
}

/// POST /analyze-form
pub async fn handle_analyze_form(
    State(state): State<AppState>,
    Form(req): Form<TranscriptIn>,
) -> Response {
    match analyze_and_record(&state, &req.transcript).await {
        Ok(response) => Html(result_page(&response, &state.log.display_name())).into_response(),
        Err(err) => {
            let (status, body) = err.into_parts();
            (status, Html(error_page(&body.to_string()))).into_response()
        }
    }
}

/// GET /api/v1/models
pub async fn handle_list_models(
    State(state): State<AppState>,
) -> Result<Json<ModelsResponse>, AppError> {
    let models = state.analyzer.list_models().await?;
    Ok(Json(ModelsResponse { models }))
}
