//! Axum route handlers for the qualification analysis.
//!
//! `/api/analyze` is a thin proxy: validate, make one completion call, return the text. Its
//! error bodies are flat `{ "error": "..." }` strings, unlike the rest of the API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::analysis::prompts::{analysis_user_message, ANALYSIS_SYSTEM, NO_ANALYSIS_FALLBACK};
use crate::analysis::renderer::{render_sections, RenderedSection};
use crate::llm_client::{ChatMessage, CompletionService, LlmError};
use crate::state::AppState;

const MISSING_INPUT: &str = "Missing job details or skills";
const GENERATION_FAILED: &str = "Failed to generate analysis";

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Missing job details or skills")]
    MissingInput,

    #[error("Failed to generate analysis: {0}")]
    Upstream(#[from] LlmError),
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AnalyzeError::MissingInput => (StatusCode::BAD_REQUEST, MISSING_INPUT),
            AnalyzeError::Upstream(e) => {
                error!("Analysis completion failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields are optional on the wire so a missing one becomes a 400, not an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub job_details: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInput {
    pub job_details: String,
    pub skills: String,
}

impl AnalyzeRequest {
    pub fn validate(self) -> Result<AnalysisInput, AnalyzeError> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        match (present(self.job_details), present(self.skills)) {
            (Some(job_details), Some(skills)) => Ok(AnalysisInput {
                job_details,
                skills,
            }),
            _ => Err(AnalyzeError::MissingInput),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub sections: Vec<RenderedSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// The fixed system + user conversation for one analysis.
pub fn analysis_messages(input: &AnalysisInput) -> [ChatMessage; 2] {
    [
        ChatMessage::system(ANALYSIS_SYSTEM),
        ChatMessage::user(analysis_user_message(&input.job_details, &input.skills)),
    ]
}

/// Exactly one completion call, no retry. Empty output becomes the fallback text.
pub async fn run_analysis(
    completion: &dyn CompletionService,
    input: &AnalysisInput,
) -> Result<String, AnalyzeError> {
    let text = completion.complete(&analysis_messages(input)).await?;
    debug!(
        "Analysis completed ({} chars)",
        text.as_deref().map(str::len).unwrap_or(0)
    );
    Ok(text.unwrap_or_else(|| NO_ANALYSIS_FALLBACK.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Body `{ jobDetails, skills }`. Validation happens before any outbound call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AnalyzeError> {
    let Json(request) = payload.map_err(|_| AnalyzeError::MissingInput)?;
    let input = request.validate()?;

    let analysis = run_analysis(state.completion.as_ref(), &input).await?;

    Ok(Json(AnalyzeResponse { analysis }))
}

/// POST /api/analyze/render
///
/// Splits an analysis into sections with sanitized HTML bodies, for clients that should not
/// render model output themselves.
pub async fn handle_render(Json(request): Json<RenderRequest>) -> Json<RenderResponse> {
    Json(RenderResponse {
        sections: render_sections(&request.analysis),
    })
}
