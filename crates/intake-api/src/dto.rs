// ============================================================================
// Intake API - Request/Response DTOs
// File: crates/intake-api/src/dto.rs
// ============================================================================
//! Request and response bodies that are not domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use intake_core::{OrderStatus, ReviewOutcome};
use intake_shared::utils::parse_uuid_list;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub document_ids: Vec<Uuid>,
}

/// `?organization_ids=a,b` on the review listings.
#[derive(Debug, Default, Deserialize)]
pub struct OrganizationFilter {
    pub organization_ids: Option<String>,
}

impl OrganizationFilter {
    pub fn ids(&self) -> Result<Vec<Uuid>, ApiError> {
        match self.organization_ids.as_deref() {
            Some(raw) => parse_uuid_list(raw)
                .map_err(|e| ApiError::BadRequest(format!("Invalid organization id: {}", e))),
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResult {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub approved: usize,
    pub rejected: usize,
}

impl From<&ReviewOutcome> for ReviewResult {
    fn from(outcome: &ReviewOutcome) -> Self {
        Self {
            order_id: outcome.order_id,
            status: outcome.order_status,
            approved: outcome.approved_count(),
            rejected: outcome.rejected_count(),
        }
    }
}
