// ============================================================================
// Intake Infrastructure - PostgreSQL Document Repository
// File: crates/intake-infrastructure/src/database/postgres/document_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{PgPool, FromRow};
use uuid::Uuid;
use tracing::error;
use chrono::{DateTime, Utc};

use intake_core::domain::{ApprovalStatus, Document, DocumentStatus, MediaKind};
use intake_core::error::DomainError;
use intake_core::repositories::DocumentRepository;

use super::parse_stored;

pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Shared with the order repository, which loads member documents.
#[derive(Debug, FromRow)]
pub(crate) struct DocumentRow {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub size_bytes: i64,
    pub media_kind: String,
    pub organization_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub category: Option<String>,
    pub status: String,
    pub approval_status: Option<String>,
    pub rejection_reason: Option<String>,
    pub order_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = DomainError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let approval_status = match row.approval_status.as_deref() {
            Some(value) => Some(parse_stored(value, "approval_status", ApprovalStatus::from_str)?),
            None => None,
        };

        Ok(Document {
            id: row.id,
            name: row.name,
            url: row.url,
            size_bytes: row.size_bytes,
            media_kind: parse_stored(&row.media_kind, "media_kind", MediaKind::from_str)?,
            organization_id: row.organization_id,
            assigned_to: row.assigned_to,
            category: row.category,
            status: parse_stored(&row.status, "status", DocumentStatus::from_str)?,
            approval_status,
            rejection_reason: row.rejection_reason,
            order_id: row.order_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Document>, DomainError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, url, size_bytes, media_kind, organization_id,
                assigned_to, category, status, approval_status,
                rejection_reason, order_id, created_at, updated_at
            FROM documents
            WHERE id = $1 AND status <> 'DELETED'
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding document by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Document::try_from).transpose()
    }

    async fn create(&self, document: &Document) -> Result<Document, DomainError> {
        let row: DocumentRow = sqlx::query_as(
            r#"
            INSERT INTO documents (
                id, name, url, size_bytes, media_kind, organization_id,
                assigned_to, category, status, approval_status,
                rejection_reason, order_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING
                id, name, url, size_bytes, media_kind, organization_id,
                assigned_to, category, status, approval_status,
                rejection_reason, order_id, created_at, updated_at
            "#
        )
        .bind(document.id)
        .bind(&document.name)
        .bind(&document.url)
        .bind(document.size_bytes)
        .bind(document.media_kind.as_str())
        .bind(document.organization_id)
        .bind(document.assigned_to)
        .bind(&document.category)
        .bind(document.status.as_str())
        .bind(document.approval_status.map(|s| s.as_str()))
        .bind(&document.rejection_reason)
        .bind(document.order_id)
        .bind(document.created_at)
        .bind(document.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating document: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Document::try_from(row)
    }

    async fn list_unassigned(&self, organization_id: &Uuid) -> Result<Vec<Document>, DomainError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT
                id, name, url, size_bytes, media_kind, organization_id,
                assigned_to, category, status, approval_status,
                rejection_reason, order_id, created_at, updated_at
            FROM documents
            WHERE organization_id = $1 AND order_id IS NULL AND status <> 'DELETED'
            ORDER BY created_at DESC
            "#
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing unassigned documents: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Document::try_from).collect()
    }
}
