// ============================================================================
// Intake Core - Document Repository Port
// File: crates/intake-core/src/repositories/document_repository.rs
// ============================================================================
//! Document repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Document;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Document>, DomainError>;
    async fn create(&self, document: &Document) -> Result<Document, DomainError>;
    /// Live documents of the organization not attached to any order, newest first.
    async fn list_unassigned(&self, organization_id: &Uuid) -> Result<Vec<Document>, DomainError>;
}
