// ============================================================================
// Intake Core - Organization Repository Port
// File: crates/intake-core/src/repositories/organization_repository.rs
// ============================================================================
//! Organization repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Organization;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError>;
    /// Organizations owned by `user_id`, oldest first.
    async fn find_owned_by(&self, user_id: &Uuid) -> Result<Vec<Organization>, DomainError>;
    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError>;
}
