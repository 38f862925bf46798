// ============================================================================
// Intake Core - Operator Queue Service
// File: crates/intake-core/src/services/operator_queue_service.rs
// ============================================================================
//! Operator work queue across all client organizations.

use std::sync::Arc;
use tracing::debug;

use crate::domain::{Actor, OperatorOrderView, OrderStatus};
use crate::error::DomainError;
use crate::repositories::OrderRepository;

pub struct OperatorQueueService<O: OrderRepository + ?Sized> {
    orders: Arc<O>,
}

impl<O: OrderRepository + ?Sized> OperatorQueueService<O> {
    pub fn new(orders: Arc<O>) -> Self {
        Self { orders }
    }

    /// Orders still in operator hands, oldest first, with per-order progress.
    /// Roles outside the back office get an empty queue.
    pub async fn get_operator_orders(
        &self,
        actor: &Actor,
    ) -> Result<Vec<OperatorOrderView>, DomainError> {
        if !actor.can_view_operator_queue() {
            debug!(user_id = %actor.user_id, role = actor.role.as_str(), "Queue hidden from role");
            return Ok(Vec::new());
        }

        let entries = self
            .orders
            .list_for_queue(&OrderStatus::OPERATOR_QUEUE)
            .await?;

        Ok(entries.iter().map(OperatorOrderView::project).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Document, DocumentStatus, MediaKind, NewDocument, Order, OrderWithDocuments,
        QueueCategory, UserRole,
    };
    use crate::repositories::MockOrderRepository;
    use uuid::Uuid;

    fn entry(categories: &[(&str, DocumentStatus)]) -> OrderWithDocuments {
        let order = Order::new("ORD-000007".to_string(), Uuid::new_v4());
        let documents = categories
            .iter()
            .map(|(category, status)| {
                let mut doc = Document::from_upload(
                    NewDocument {
                        name: "page.pdf".to_string(),
                        url: "https://files.example.com/page.pdf".to_string(),
                        size_bytes: 2048,
                        media_kind: MediaKind::Pdf,
                        category: Some(category.to_string()),
                    },
                    order.organization_id,
                )
                .unwrap();
                doc.status = *status;
                doc.order_id = Some(order.id);
                doc
            })
            .collect();
        OrderWithDocuments {
            order,
            organization_name: "Northwind".to_string(),
            documents,
        }
    }

    #[tokio::test]
    async fn test_non_desk_roles_see_empty_queue() {
        let mut orders = MockOrderRepository::new();
        orders.expect_list_for_queue().never();

        let svc = OperatorQueueService::new(Arc::new(orders));
        for role in [UserRole::SuperAdmin, UserRole::Client, UserRole::Employee] {
            let actor = Actor::new(Uuid::new_v4(), Some(Uuid::new_v4()), role);
            assert!(
                svc.get_operator_orders(&actor).await.unwrap().is_empty(),
                "{} must not see the queue",
                role.as_str()
            );
        }
    }

    #[tokio::test]
    async fn test_operator_queue_projection() {
        let queued = entry(&[
            ("SALES_INVOICE", DocumentStatus::Processing),
            ("PURCHASE_INVOICE", DocumentStatus::Completed),
            ("BANK_STATEMENT", DocumentStatus::Uploaded),
        ]);

        let mut orders = MockOrderRepository::new();
        orders
            .expect_list_for_queue()
            .withf(|statuses| statuses == OrderStatus::OPERATOR_QUEUE)
            .returning(move |_| Ok(vec![queued.clone()]));

        let svc = OperatorQueueService::new(Arc::new(orders));
        let actor = Actor::new(Uuid::new_v4(), None, UserRole::EntryOperator);
        let views = svc.get_operator_orders(&actor).await.unwrap();

        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.client_name, "Northwind");
        assert_eq!(view.category, QueueCategory::Invoice);
        assert_eq!(view.stats.total, 3);
        assert_eq!(view.stats.processed, 1);
        assert_eq!(view.stats.pending, 2);
        assert_eq!(view.stats.pending_invoices, 1);
        assert_eq!(view.stats.pending_statements, 1);
    }
}
