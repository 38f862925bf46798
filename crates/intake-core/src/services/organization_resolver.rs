// ============================================================================
// Intake Core - Organization Resolver
// File: crates/intake-core/src/services/organization_resolver.rs
// ============================================================================
//! Resolves which organizations an actor speaks for.

use std::sync::Arc;
use uuid::Uuid;
use tracing::warn;

use crate::domain::{Actor, Order};
use crate::error::DomainError;
use crate::repositories::OrganizationRepository;

pub struct OrganizationResolver<G: OrganizationRepository + ?Sized> {
    organizations: Arc<G>,
}

impl<G: OrganizationRepository + ?Sized> Clone for OrganizationResolver<G> {
    fn clone(&self) -> Self {
        Self {
            organizations: Arc::clone(&self.organizations),
        }
    }
}

impl<G: OrganizationRepository + ?Sized> OrganizationResolver<G> {
    pub fn new(organizations: Arc<G>) -> Self {
        Self { organizations }
    }

    /// Membership organization, else the first organization the actor owns.
    pub async fn resolve_primary(&self, actor: &Actor) -> Result<Uuid, DomainError> {
        if let Some(id) = actor.organization_id {
            return Ok(id);
        }

        self.organizations
            .find_owned_by(&actor.user_id)
            .await?
            .first()
            .map(|org| org.id)
            .ok_or(DomainError::NoOrganization(actor.user_id))
    }

    /// Every organization the actor owns or belongs to.
    pub async fn accessible(&self, actor: &Actor) -> Result<Vec<Uuid>, DomainError> {
        let mut ids: Vec<Uuid> = self
            .organizations
            .find_owned_by(&actor.user_id)
            .await?
            .into_iter()
            .map(|org| org.id)
            .collect();

        if let Some(member_of) = actor.organization_id {
            if !ids.contains(&member_of) {
                ids.push(member_of);
            }
        }
        Ok(ids)
    }

    /// Staff may act on any tenant's order when `allow_staff` is set; everyone
    /// else only on orders of their own organizations.
    pub async fn ensure_order_access(
        &self,
        actor: &Actor,
        order: &Order,
        allow_staff: bool,
    ) -> Result<(), DomainError> {
        if allow_staff && actor.role.is_staff() {
            return Ok(());
        }
        if actor.organization_id == Some(order.organization_id) {
            return Ok(());
        }
        if self.accessible(actor).await?.contains(&order.organization_id) {
            return Ok(());
        }

        warn!(
            user_id = %actor.user_id,
            order_id = %order.id,
            "Cross-organization access to order denied"
        );
        Err(DomainError::Forbidden(order.id))
    }
}
