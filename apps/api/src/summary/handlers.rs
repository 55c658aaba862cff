//! Axum route handlers for the summary API.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{AppError, MISSING_FIELDS_MESSAGE};
use crate::state::AppState;
use crate::summary::{summarize_transcript, Category, Interpretation, SummaryResult};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct SummaryRequest {
    pub company_name: String,
    pub transcript_text: String,
}

impl SummaryRequest {
    /// Reads both fields from a JSON object body.
    /// A missing or non-string field is a validation error.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, AppError> {
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);

        match (field("company_name"), field("transcript_text")) {
            (Some(company_name), Some(transcript_text)) => Ok(Self {
                company_name,
                transcript_text,
            }),
            _ => Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub company_name: String,
    #[serde(flatten)]
    pub summary: SummaryResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
///
/// Static usage descriptor.
pub async fn handle_home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Earnings Transcript Summary API!",
        "usage": {
            "endpoint": "/earnings_transcript_summary",
            "method": "POST",
            "example_input": {
                "company_name": "Reliance Industries",
                "transcript_text": "YOUR TRANSCRIPT TEXT HERE"
            }
        }
    }))
}

/// POST /earnings_transcript_summary
///
/// Summarizes a transcript into five categories. A reply the interpreter
/// rejects is still a 200, with only an `error` field in the body.
pub async fn handle_summary(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Response, AppError> {
    // Only a JSON object is accepted; arrays and scalars are rejected by the extractor.
    let Json(body) = payload?;

    let SummaryRequest {
        company_name,
        transcript_text,
    } = SummaryRequest::from_body(&body)?;

    if transcript_text.is_empty() {
        return Err(AppError::Validation(
            "Transcript text cannot be empty".to_string(),
        ));
    }

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        "Summarizing transcript for '{}' ({} chars) with {}",
        company_name,
        transcript_text.len(),
        state.llm.model_name()
    );

    let interpretation = summarize_transcript(state.llm.as_ref(), &transcript_text).await?;

    let response = match interpretation {
        Interpretation::Summary(summary) => {
            let extracted = Category::ALL
                .iter()
                .filter(|c| summary.get(**c) != c.placeholder())
                .count();
            info!(
                %request_id,
                "Summary generated for '{}' ({}/{} categories extracted)",
                company_name,
                extracted,
                Category::ALL.len()
            );
            Json(SummaryResponse {
                company_name,
                summary,
            })
            .into_response()
        }
        rejected @ Interpretation::Rejected { .. } => {
            warn!(%request_id, "Model reply rejected for '{}'", company_name);
            Json(rejected).into_response()
        }
    };

    Ok(response)
}
