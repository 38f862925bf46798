// ============================================================================
// Intake API - Router
// File: crates/intake-api/src/router.rs
// ============================================================================
//! Router assembly

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use intake_shared::constants::API_PREFIX;

use crate::handlers::{documents, health, operator, orders};
use crate::state::AppState;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/documents", post(documents::register_document))
        .route("/documents/unassigned", get(documents::list_unassigned))
        .route("/orders", post(orders::create_order).get(orders::list_my_orders))
        .route("/orders/review", get(orders::review_orders))
        .route("/orders/completed", get(orders::completed_orders))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/submit", post(orders::submit_order))
        .route("/orders/{id}/review", post(orders::review_order))
        .route("/operator/orders", get(operator::operator_orders));

    Router::new()
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
}
