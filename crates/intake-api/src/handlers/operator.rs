// ============================================================================
// Intake API - Operator Handlers
// File: crates/intake-api/src/handlers/operator.rs
// ============================================================================
//! Operator work queue handler

use axum::{extract::State, Json};

use intake_core::OperatorOrderView;

use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/operator/orders
pub async fn operator_orders(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<ApiResponse<Vec<OperatorOrderView>>>, ApiError> {
    let queue = state.queue.get_operator_orders(&actor).await?;
    Ok(Json(ApiResponse::success(queue)))
}
