//! Axum route handlers for the content-plan API.

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::plan::assembler::{assemble, DATE_FORMAT};
use crate::plan::profile::UserProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratePlanResponse {
    pub success: bool,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentPlanRequest {
    pub user_data: UserProfile,
    pub generated_plan: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentPlanResponse {
    pub success: bool,
    pub document_link: String,
    pub document_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-plan
///
/// Forwards the front-end's prompt to the LLM and returns the plan text.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Json(request): Json<GeneratePlanRequest>,
) -> Result<Json<GeneratePlanResponse>, AppError> {
    info!("Generating content plan ({} byte prompt)", request.prompt.len());

    let content = state.llm.generate(&request.prompt).await?;

    Ok(Json(GeneratePlanResponse {
        success: true,
        content,
    }))
}

/// POST /api/create-content-plan
///
/// Publishes the generated plan as a shared Google Doc:
/// create → batchUpdate → permission → link. A step failing mid-sequence is
/// reported as total failure; an already-created document is not cleaned up.
pub async fn handle_create_content_plan(
    State(state): State<AppState>,
    Json(request): Json<CreateContentPlanRequest>,
) -> Result<Json<CreateContentPlanResponse>, AppError> {
    let profile = &request.user_data;
    // One clock read per request — the document title and body must agree.
    let date_created = Local::now().format(DATE_FORMAT).to_string();

    let docs = state.docs.authorize().await?;

    let title = format!(
        "{} {} - 30-Day Content Plan - {}",
        profile.first_name, profile.last_name, date_created
    );
    let document_id = docs.create_document(&title).await?;
    info!("Created document {document_id}");

    let edits = assemble(profile, &request.generated_plan, &date_created);
    docs.apply_edits(&document_id, &edits).await?;

    docs.set_public(&document_id).await?;

    let document_link = docs.view_link(&document_id).await?;
    info!("Published content plan at {document_link}");

    Ok(Json(CreateContentPlanResponse {
        success: true,
        document_link,
        document_id,
    }))
}
