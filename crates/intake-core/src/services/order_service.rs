// ============================================================================
// Intake Core - Order Lifecycle Service
// File: crates/intake-core/src/services/order_service.rs
// ============================================================================
//! Create, submit, and review orders; enforces the order state machine.

use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use tracing::{debug, info, warn};

use intake_shared::utils::format_order_number;

use crate::domain::{
    plan_review, Actor, Order, OrderStatus, OrderWithDocuments, ReviewOutcome, ReviewRequest,
};
use crate::error::DomainError;
use crate::repositories::{OrderRepository, OrganizationRepository};
use crate::services::OrganizationResolver;

/// Switches for behavior the business has not settled on.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderPolicy {
    pub require_processed_on_submit: bool,
}

pub struct OrderService<O, G>
where
    O: OrderRepository + ?Sized,
    G: OrganizationRepository + ?Sized,
{
    orders: Arc<O>,
    resolver: OrganizationResolver<G>,
    policy: OrderPolicy,
}

impl<O, G> OrderService<O, G>
where
    O: OrderRepository + ?Sized,
    G: OrganizationRepository + ?Sized,
{
    pub fn new(orders: Arc<O>, organizations: Arc<G>, policy: OrderPolicy) -> Self {
        Self {
            orders,
            resolver: OrganizationResolver::new(organizations),
            policy,
        }
    }

    /// Creates an order for the actor's organization from uploaded documents.
    ///
    /// Documents owned by another organization are skipped, not rejected.
    pub async fn create_order(
        &self,
        actor: &Actor,
        document_ids: &[Uuid],
    ) -> Result<Order, DomainError> {
        if document_ids.is_empty() {
            return Err(DomainError::ValidationError(
                "An order needs at least one document".to_string(),
            ));
        }

        let organization_id = self.resolver.resolve_primary(actor).await?;

        let mut ids = document_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        // Not race-safe: two concurrent creates can read the same count.
        let sequence = self.orders.count().await? + 1;
        let order = Order::new(format_order_number(sequence), organization_id);

        let attached = self.orders.create_with_documents(&order, &ids).await?;
        if (attached as usize) < ids.len() {
            warn!(
                order_id = %order.id,
                requested = ids.len(),
                attached,
                "Skipped documents outside the ordering organization"
            );
        }

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            organization_id = %organization_id,
            attached,
            "Order created"
        );
        Ok(order)
    }

    /// Operator hands the order to the client for review.
    pub async fn submit_for_review(
        &self,
        actor: &Actor,
        order_id: &Uuid,
    ) -> Result<Order, DomainError> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(*order_id))?;

        self.resolver.ensure_order_access(actor, &order, true).await?;

        let Some(next) = order.status.on_submit()? else {
            debug!(order_id = %order.id, "Order already awaiting review");
            return Ok(order);
        };

        if self.policy.require_processed_on_submit {
            self.ensure_documents_processed(order_id).await?;
        }

        let now = Utc::now();
        self.orders.update_status(order_id, next, now).await?;

        info!(
            order_id = %order.id,
            from = %order.status,
            to = %next,
            "Order submitted for review"
        );
        order.status = next;
        order.updated_at = now;
        Ok(order)
    }

    /// Applies the client's batch decision atomically.
    pub async fn review_order(
        &self,
        actor: &Actor,
        order_id: &Uuid,
        request: &ReviewRequest,
    ) -> Result<ReviewOutcome, DomainError> {
        let entry = self
            .orders
            .find_with_documents(order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(*order_id))?;

        self.resolver
            .ensure_order_access(actor, &entry.order, false)
            .await?;

        let outcome = plan_review(&entry.order, &entry.documents, request)?;
        self.orders.apply_review(&outcome).await?;

        info!(
            order_id = %order_id,
            status = %outcome.order_status,
            approved = outcome.approved_count(),
            rejected = outcome.rejected_count(),
            "Order reviewed"
        );
        Ok(outcome)
    }

    pub async fn get_order(
        &self,
        actor: &Actor,
        order_id: &Uuid,
    ) -> Result<OrderWithDocuments, DomainError> {
        let entry = self
            .orders
            .find_with_documents(order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(*order_id))?;

        self.resolver
            .ensure_order_access(actor, &entry.order, true)
            .await?;
        Ok(entry)
    }

    /// Orders of the actor's organization; empty when it has none.
    pub async fn list_my_orders(
        &self,
        actor: &Actor,
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        match self.resolver.resolve_primary(actor).await {
            Ok(organization_id) => self.orders.list_by_organization(&organization_id).await,
            Err(DomainError::NoOrganization(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub async fn get_review_orders(
        &self,
        actor: &Actor,
        organization_ids: &[Uuid],
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        self.list_in_status(actor, organization_ids, OrderStatus::ReviewPending)
            .await
    }

    pub async fn get_completed_orders(
        &self,
        actor: &Actor,
        organization_ids: &[Uuid],
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        self.list_in_status(actor, organization_ids, OrderStatus::Completed)
            .await
    }

    async fn list_in_status(
        &self,
        actor: &Actor,
        organization_ids: &[Uuid],
        status: OrderStatus,
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        let scope = if actor.role.is_staff() {
            organization_ids.to_vec()
        } else {
            let accessible = self.resolver.accessible(actor).await?;
            if organization_ids.is_empty() {
                accessible
            } else {
                organization_ids
                    .iter()
                    .copied()
                    .filter(|id| accessible.contains(id))
                    .collect()
            }
        };

        if scope.is_empty() {
            return Ok(Vec::new());
        }
        self.orders.list_by_status(&scope, status).await
    }

    async fn ensure_documents_processed(&self, order_id: &Uuid) -> Result<(), DomainError> {
        let entry = self
            .orders
            .find_with_documents(order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(*order_id))?;

        let total = entry.documents.len();
        let pending = entry
            .documents
            .iter()
            .filter(|doc| !doc.status.is_processed())
            .count();

        if pending > 0 {
            warn!(order_id = %order_id, pending, total, "Submit refused: unprocessed documents");
            return Err(DomainError::DocumentsNotProcessed { pending, total });
        }
        Ok(())
    }
}
