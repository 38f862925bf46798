// ============================================================================
// Intake Core - Order Aggregate
// File: crates/intake-core/src/domain/order.rs
// Description: Batch of documents and its review state machine
// ============================================================================

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Document;
use crate::error::DomainError;

/// Persisted order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    ReviewPending,
    Completed,
    Returned,
}

impl OrderStatus {
    /// Statuses shown in the operator work queue.
    pub const OPERATOR_QUEUE: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Returned,
        OrderStatus::ReviewPending,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::ReviewPending => "REVIEW_PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Returned => "RETURNED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(OrderStatus::Pending),
            "PROCESSING" => Some(OrderStatus::Processing),
            "REVIEW_PENDING" => Some(OrderStatus::ReviewPending),
            "COMPLETED" => Some(OrderStatus::Completed),
            "RETURNED" => Some(OrderStatus::Returned),
            _ => None,
        }
    }

    /// Status after an operator submits the order for client review.
    ///
    /// Returns `None` when the order is already awaiting review.
    pub fn on_submit(self) -> Result<Option<OrderStatus>, DomainError> {
        match self {
            OrderStatus::Pending | OrderStatus::Processing | OrderStatus::Returned => {
                Ok(Some(OrderStatus::ReviewPending))
            }
            OrderStatus::ReviewPending => Ok(None),
            OrderStatus::Completed => Err(DomainError::InvalidStatusTransition {
                action: "submit",
                from: self,
            }),
        }
    }

    /// Status after the client decision; `any_rejected` sends it back to the operator.
    pub fn on_review(self, any_rejected: bool) -> Result<OrderStatus, DomainError> {
        match self {
            OrderStatus::ReviewPending if any_rejected => Ok(OrderStatus::Returned),
            OrderStatus::ReviewPending => Ok(OrderStatus::Completed),
            OrderStatus::Pending
            | OrderStatus::Processing
            | OrderStatus::Returned
            | OrderStatus::Completed => Err(DomainError::InvalidStatusTransition {
                action: "review",
                from: self,
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub organization_id: Uuid,
    pub status: OrderStatus,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(order_number: String, organization_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_number,
            organization_id,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An order together with its owner's name and member documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithDocuments {
    pub order: Order,
    pub organization_name: String,
    pub documents: Vec<Document>,
}
