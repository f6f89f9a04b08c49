use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::analyzer::AnalysisError;
use crate::transcript_log::LogError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Log error: {0}")]
    Log(#[from] LogError),
}

impl AppError {
    /// Status code and caller-facing message. Logs server-side failures.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Analysis(AnalysisError::EmptyInput) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Analysis(e) => {
                tracing::error!("Analysis failed: {e}");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::Log(e) => {
                tracing::error!("Transcript log error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to record the analysis".to_string(),
                )
            }
        }
    }

    /// The JSON error payload, `{"error": "<message>"}`.
    pub fn into_parts(self) -> (StatusCode, serde_json::Value) {
        let (status, message) = self.status_and_message();
        (status, json!({ "error": message }))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_parts();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;

    #[test]
    fn test_empty_input_is_client_error() {
        let (status, body) = AppError::from(AnalysisError::EmptyInput).into_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Empty transcript."}));
    }

    #[test]
    fn test_upstream_failure_is_gateway_error_with_message() {
        let err = AppError::from(AnalysisError::Upstream(LlmError::Api {
            status: 503,
            message: "over capacity".to_string(),
        }));
        let (status, body) = err.into_parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["error"],
            "Completion API error: API error (status 503): over capacity"
        );
    }

    #[test]
    fn test_missing_response_is_surfaced_like_upstream_failure() {
        let (status, body) = AppError::from(AnalysisError::ResponseMissing).into_parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Could not parse completion API response.");
    }

    #[test]
    fn test_log_failure_hides_details() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let (status, body) = AppError::from(LogError::from(io)).into_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to record the analysis");
    }
}
