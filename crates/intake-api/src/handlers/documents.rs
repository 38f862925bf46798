// ============================================================================
// Intake API - Document Handlers
// File: crates/intake-api/src/handlers/documents.rs
// ============================================================================
//! Document record handlers

use axum::{extract::State, http::StatusCode, Json};

use intake_core::{Document, NewDocument};

use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/documents
pub async fn register_document(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<NewDocument>,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), ApiError> {
    let document = state.documents.register_document(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(document))))
}

/// GET /api/v1/documents/unassigned
pub async fn list_unassigned(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<ApiResponse<Vec<Document>>>, ApiError> {
    let documents = state.documents.list_unassigned(&actor).await?;
    Ok(Json(ApiResponse::success(documents)))
}
