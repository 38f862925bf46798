// ============================================================================
// Intake Core - Document Service
// File: crates/intake-core/src/services/document_service.rs
// ============================================================================
//! Uploaded document registration

use std::sync::Arc;
use tracing::info;

use crate::domain::{Actor, Document, NewDocument};
use crate::error::DomainError;
use crate::repositories::{DocumentRepository, OrganizationRepository};
use crate::services::OrganizationResolver;

pub struct DocumentService<D, G>
where
    D: DocumentRepository + ?Sized,
    G: OrganizationRepository + ?Sized,
{
    documents: Arc<D>,
    resolver: OrganizationResolver<G>,
}

impl<D, G> DocumentService<D, G>
where
    D: DocumentRepository + ?Sized,
    G: OrganizationRepository + ?Sized,
{
    pub fn new(documents: Arc<D>, organizations: Arc<G>) -> Self {
        Self {
            documents,
            resolver: OrganizationResolver::new(organizations),
        }
    }

    /// Records a stored upload under the actor's organization.
    pub async fn register_document(
        &self,
        actor: &Actor,
        upload: NewDocument,
    ) -> Result<Document, DomainError> {
        let organization_id = self.resolver.resolve_primary(actor).await?;
        let document = Document::from_upload(upload, organization_id)?;
        let document = self.documents.create(&document).await?;

        info!(
            document_id = %document.id,
            organization_id = %organization_id,
            media_kind = document.media_kind.as_str(),
            "Document registered"
        );
        Ok(document)
    }

    /// Documents of the actor's organization not yet attached to an order.
    pub async fn list_unassigned(&self, actor: &Actor) -> Result<Vec<Document>, DomainError> {
        match self.resolver.resolve_primary(actor).await {
            Ok(organization_id) => self.documents.list_unassigned(&organization_id).await,
            Err(DomainError::NoOrganization(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}
