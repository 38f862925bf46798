// ============================================================================
// Intake Core - Order Repository Port
// File: crates/intake-core/src/repositories/order_repository.rs
// ============================================================================
//! Order repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::{Order, OrderStatus, OrderWithDocuments, ReviewOutcome};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Total number of orders ever created; seeds the next order number.
    async fn count(&self) -> Result<i64, DomainError>;

    /// Inserts `order` and attaches those of `document_ids` that belong to the
    /// order's organization, in one transaction. Returns the attached count.
    async fn create_with_documents(
        &self,
        order: &Order,
        document_ids: &[Uuid],
    ) -> Result<u64, DomainError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, DomainError>;

    async fn find_with_documents(&self, id: &Uuid) -> Result<Option<OrderWithDocuments>, DomainError>;

    async fn update_status(
        &self,
        id: &Uuid,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Commits every document decision and the order status together.
    async fn apply_review(&self, outcome: &ReviewOutcome) -> Result<(), DomainError>;

    /// Orders of one organization, newest first.
    async fn list_by_organization(
        &self,
        organization_id: &Uuid,
    ) -> Result<Vec<OrderWithDocuments>, DomainError>;

    /// Orders of the given organizations in `status`. `REVIEW_PENDING` sorts by
    /// creation time, everything else by last update, newest first.
    async fn list_by_status(
        &self,
        organization_ids: &[Uuid],
        status: OrderStatus,
    ) -> Result<Vec<OrderWithDocuments>, DomainError>;

    /// Orders of every organization in any of `statuses`, oldest first.
    async fn list_for_queue(
        &self,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderWithDocuments>, DomainError>;
}
