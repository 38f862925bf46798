// ============================================================================
// Intake Core - Domain Errors
// File: crates/intake-core/src/error.rs
// ============================================================================
//! Domain errors

use thiserror::Error;
use uuid::Uuid;

use crate::domain::OrderStatus;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Actor {0} does not belong to any organization")]
    NoOrganization(Uuid),

    #[error("Access to order {0} denied")]
    Forbidden(Uuid),

    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("Rejection reason is required for document {0}")]
    InvalidRejectionReason(Uuid),

    #[error("Cannot {action} an order in status {from}")]
    InvalidStatusTransition {
        action: &'static str,
        from: OrderStatus,
    },

    #[error("{pending} of {total} documents are not processed yet")]
    DocumentsNotProcessed { pending: usize, total: usize },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string().replace('\n', ", "))
    }
}
