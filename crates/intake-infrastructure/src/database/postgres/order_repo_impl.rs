// ============================================================================
// Intake Infrastructure - PostgreSQL Order Repository
// File: crates/intake-infrastructure/src/database/postgres/order_repo_impl.rs
// ============================================================================
//! Orders and their member documents. Multi-row writes run in one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, FromRow};
use uuid::Uuid;
use tracing::{debug, error, warn};
use chrono::{DateTime, Utc};

use intake_core::domain::{
    Document, Order, OrderStatus, OrderWithDocuments, ReviewDecision, ReviewOutcome,
    ApprovalStatus, DocumentStatus,
};
use intake_core::error::DomainError;
use intake_core::repositories::OrderRepository;

use super::document_repo_impl::DocumentRow;
use super::parse_stored;

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Loads member documents for `rows` in one query and zips them up.
    async fn attach_documents(
        &self,
        rows: Vec<OrderRow>,
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let documents: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, url, size_bytes, media_kind, organization_id,
                assigned_to, category, status, approval_status,
                rejection_reason, order_id, created_at, updated_at
            FROM documents
            WHERE order_id = ANY($1)
            ORDER BY created_at ASC
            "#
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading order documents"))?;

        let mut by_order: HashMap<Uuid, Vec<Document>> = HashMap::new();
        for row in documents {
            if let Some(order_id) = row.order_id {
                by_order.entry(order_id).or_default().push(Document::try_from(row)?);
            }
        }

        rows.into_iter()
            .map(|row| {
                let documents = by_order.remove(&row.id).unwrap_or_default();
                row.into_entry(documents)
            })
            .collect()
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub organization_id: Uuid,
    pub organization_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_entry(self, documents: Vec<Document>) -> Result<OrderWithDocuments, DomainError> {
        let organization_name = self.organization_name.clone();
        Ok(OrderWithDocuments {
            order: Order::try_from(self)?,
            organization_name,
            documents,
        })
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            order_number: row.order_number,
            organization_id: row.organization_id,
            status: parse_stored(&row.status, "status", OrderStatus::from_str)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting orders"))
    }

    async fn create_with_documents(
        &self,
        order: &Order,
        document_ids: &[Uuid],
    ) -> Result<u64, DomainError> {
        let mut transaction = self.pool.begin().await.map_err(db_error("opening transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, order_number, organization_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#
        )
        .bind(order.id)
        .bind(&order.order_number)
        .bind(order.organization_id)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *transaction)
        .await
        .map_err(db_error("inserting order"))?;

        // Documents of other organizations are left untouched.
        let attached = sqlx::query(
            r#"
            UPDATE documents
            SET order_id = $1, updated_at = $2
            WHERE id = ANY($3) AND organization_id = $4
            "#
        )
        .bind(order.id)
        .bind(order.created_at)
        .bind(document_ids)
        .bind(order.organization_id)
        .execute(&mut *transaction)
        .await
        .map_err(db_error("attaching documents"))?
        .rows_affected();

        transaction.commit().await.map_err(db_error("committing order"))?;
        debug!(order_id = %order.id, attached, "Order persisted");

        Ok(attached)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT o.id, o.order_number, o.organization_id, org.name AS organization_name,
                   o.status, o.created_at, o.updated_at
            FROM orders o
            JOIN organizations org ON org.id = o.organization_id
            WHERE o.id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding order by id"))?;

        row.map(Order::try_from).transpose()
    }

    async fn find_with_documents(
        &self,
        id: &Uuid,
    ) -> Result<Option<OrderWithDocuments>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT o.id, o.order_number, o.organization_id, org.name AS organization_name,
                   o.status, o.created_at, o.updated_at
            FROM orders o
            JOIN organizations org ON org.id = o.organization_id
            WHERE o.id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding order by id"))?;

        match row {
            Some(row) => Ok(self.attach_documents(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(db_error("updating order status"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::OrderNotFound(*id));
        }
        Ok(())
    }

    async fn apply_review(&self, outcome: &ReviewOutcome) -> Result<(), DomainError> {
        let mut transaction = self.pool.begin().await.map_err(db_error("opening transaction"))?;

        for decision in &outcome.decisions {
            let (approval, status, reason) = match &decision.decision {
                ReviewDecision::Approved => {
                    (ApprovalStatus::Approved, DocumentStatus::Completed, None)
                }
                ReviewDecision::Rejected { reason } => (
                    ApprovalStatus::Rejected,
                    DocumentStatus::Returned,
                    Some(reason.as_str()),
                ),
            };

            let updated = sqlx::query(
                r#"
                UPDATE documents
                SET approval_status = $3, status = $4, rejection_reason = $5, updated_at = $6
                WHERE id = $1 AND order_id = $2
                "#
            )
            .bind(decision.document_id)
            .bind(outcome.order_id)
            .bind(approval.as_str())
            .bind(status.as_str())
            .bind(reason)
            .bind(outcome.decided_at)
            .execute(&mut *transaction)
            .await
            .map_err(db_error("writing review decision"))?
            .rows_affected();

            // Dropping the transaction rolls back earlier writes.
            if updated == 0 {
                warn!(
                    order_id = %outcome.order_id,
                    document_id = %decision.document_id,
                    "Document left the order before review commit"
                );
                return Err(DomainError::DocumentNotFound(decision.document_id));
            }
        }

        let updated = sqlx::query("UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(outcome.order_id)
            .bind(outcome.order_status.as_str())
            .bind(outcome.decided_at)
            .execute(&mut *transaction)
            .await
            .map_err(db_error("updating reviewed order"))?
            .rows_affected();

        if updated == 0 {
            return Err(DomainError::OrderNotFound(outcome.order_id));
        }

        transaction.commit().await.map_err(db_error("committing review"))?;
        Ok(())
    }

    async fn list_by_organization(
        &self,
        organization_id: &Uuid,
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT o.id, o.order_number, o.organization_id, org.name AS organization_name,
                   o.status, o.created_at, o.updated_at
            FROM orders o
            JOIN organizations org ON org.id = o.organization_id
            WHERE o.organization_id = $1
            ORDER BY o.created_at DESC
            "#
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing organization orders"))?;

        self.attach_documents(rows).await
    }

    async fn list_by_status(
        &self,
        organization_ids: &[Uuid],
        status: OrderStatus,
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        let query = match status {
            OrderStatus::ReviewPending => {
                r#"
                SELECT o.id, o.order_number, o.organization_id, org.name AS organization_name,
                       o.status, o.created_at, o.updated_at
                FROM orders o
                JOIN organizations org ON org.id = o.organization_id
                WHERE o.organization_id = ANY($1) AND o.status = $2
                ORDER BY o.created_at DESC
                "#
            }
            _ => {
                r#"
                SELECT o.id, o.order_number, o.organization_id, org.name AS organization_name,
                       o.status, o.created_at, o.updated_at
                FROM orders o
                JOIN organizations org ON org.id = o.organization_id
                WHERE o.organization_id = ANY($1) AND o.status = $2
                ORDER BY o.updated_at DESC
                "#
            }
        };

        let rows: Vec<OrderRow> = sqlx::query_as(query)
            .bind(organization_ids)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing orders by status"))?;

        self.attach_documents(rows).await
    }

    async fn list_for_queue(
        &self,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        let statuses: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();

        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT o.id, o.order_number, o.organization_id, org.name AS organization_name,
                   o.status, o.created_at, o.updated_at
            FROM orders o
            JOIN organizations org ON org.id = o.organization_id
            WHERE o.status = ANY($1)
            ORDER BY o.created_at ASC
            "#
        )
        .bind(&statuses)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing operator queue"))?;

        self.attach_documents(rows).await
    }
}
