// ============================================================================
// Intake API - Order Handlers
// File: crates/intake-api/src/handlers/orders.rs
// ============================================================================
//! Order lifecycle HTTP handlers (create, submit, review, listings)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use intake_core::{Order, OrderWithDocuments, ReviewRequest};

use crate::dto::{CreateOrderRequest, OrganizationFilter, ReviewResult};
use crate::error::ApiError;
use crate::extract::CurrentActor;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create order handler - POST /api/v1/orders
pub async fn create_order(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Order>>), ApiError> {
    let order = state.orders.create_order(&actor, &payload.document_ids).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

/// GET /api/v1/orders
pub async fn list_my_orders(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<ApiResponse<Vec<OrderWithDocuments>>>, ApiError> {
    let orders = state.orders.list_my_orders(&actor).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(order_id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderWithDocuments>>, ApiError> {
    let order = state.orders.get_order(&actor, &order_id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Operator hands the order to the client - POST /api/v1/orders/{id}/submit
pub async fn submit_order(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(order_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Order>>, ApiError> {
    let order = state.orders.submit_for_review(&actor, &order_id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Client batch decision - POST /api/v1/orders/{id}/review
pub async fn review_order(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<ApiResponse<ReviewResult>>, ApiError> {
    let outcome = state.orders.review_order(&actor, &order_id, &payload).await?;
    Ok(Json(ApiResponse::success(ReviewResult::from(&outcome))))
}

/// GET /api/v1/orders/review?organization_ids=a,b
pub async fn review_orders(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(filter): Query<OrganizationFilter>,
) -> Result<Json<ApiResponse<Vec<OrderWithDocuments>>>, ApiError> {
    let orders = state.orders.get_review_orders(&actor, &filter.ids()?).await?;
    Ok(Json(ApiResponse::success(orders)))
}

/// GET /api/v1/orders/completed?organization_ids=a,b
pub async fn completed_orders(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(filter): Query<OrganizationFilter>,
) -> Result<Json<ApiResponse<Vec<OrderWithDocuments>>>, ApiError> {
    let orders = state.orders.get_completed_orders(&actor, &filter.ids()?).await?;
    Ok(Json(ApiResponse::success(orders)))
}
