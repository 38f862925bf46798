// ============================================================================
// Intake Infrastructure - In-Memory Store
// File: crates/intake-infrastructure/src/memory.rs
// ============================================================================
//! In-memory implementation of the repository ports.
//!
//! Backs local runs without PostgreSQL (`database.url = "memory"`) and the API
//! tests. Every write takes the single lock, so a review either lands whole or
//! not at all. Organizations are not required to exist before documents or
//! orders reference them; a missing one shows up with an empty name.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use intake_core::domain::{
    Document, DocumentStatus, Order, OrderStatus, OrderWithDocuments, Organization,
    ReviewOutcome,
};
use intake_core::error::DomainError;
use intake_core::repositories::{DocumentRepository, OrderRepository, OrganizationRepository};

#[derive(Default)]
struct State {
    organizations: HashMap<Uuid, Organization>,
    documents: HashMap<Uuid, Document>,
    orders: HashMap<Uuid, Order>,
}

impl State {
    fn entry(&self, order: &Order) -> OrderWithDocuments {
        let mut documents: Vec<Document> = self
            .documents
            .values()
            .filter(|doc| doc.order_id == Some(order.id))
            .cloned()
            .collect();
        documents.sort_by_key(|doc| doc.created_at);

        OrderWithDocuments {
            order: order.clone(),
            organization_name: self
                .organizations
                .get(&order.organization_id)
                .map(|org| org.name.clone())
                .unwrap_or_default(),
            documents,
        }
    }

    fn entries<'a>(&self, orders: impl Iterator<Item = &'a Order>) -> Vec<OrderWithDocuments> {
        orders.map(|order| self.entry(order)).collect()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrganizationRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError> {
        Ok(self.state.read().organizations.get(id).cloned())
    }

    async fn find_owned_by(&self, user_id: &Uuid) -> Result<Vec<Organization>, DomainError> {
        let state = self.state.read();
        let mut owned: Vec<Organization> = state
            .organizations
            .values()
            .filter(|org| org.owner_id == Some(*user_id))
            .cloned()
            .collect();
        owned.sort_by_key(|org| org.created_at);
        Ok(owned)
    }

    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError> {
        let mut state = self.state.write();
        if state.organizations.contains_key(&organization.id) {
            return Err(DomainError::DatabaseError(format!(
                "organization {} already exists",
                organization.id
            )));
        }
        state
            .organizations
            .insert(organization.id, organization.clone());
        Ok(organization.clone())
    }
}

#[async_trait]
impl DocumentRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Document>, DomainError> {
        Ok(self
            .state
            .read()
            .documents
            .get(id)
            .filter(|doc| doc.status != DocumentStatus::Deleted)
            .cloned())
    }

    async fn create(&self, document: &Document) -> Result<Document, DomainError> {
        self.state
            .write()
            .documents
            .insert(document.id, document.clone());
        Ok(document.clone())
    }

    async fn list_unassigned(&self, organization_id: &Uuid) -> Result<Vec<Document>, DomainError> {
        let state = self.state.read();
        let mut documents: Vec<Document> = state
            .documents
            .values()
            .filter(|doc| {
                doc.organization_id == *organization_id
                    && doc.order_id.is_none()
                    && doc.status != DocumentStatus::Deleted
            })
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.state.read().orders.len() as i64)
    }

    async fn create_with_documents(
        &self,
        order: &Order,
        document_ids: &[Uuid],
    ) -> Result<u64, DomainError> {
        let mut state = self.state.write();

        if state
            .orders
            .values()
            .any(|existing| existing.order_number == order.order_number)
        {
            return Err(DomainError::DatabaseError(format!(
                "order number {} already taken",
                order.order_number
            )));
        }

        state.orders.insert(order.id, order.clone());

        let mut attached = 0;
        for id in document_ids {
            if let Some(doc) = state.documents.get_mut(id) {
                if doc.organization_id == order.organization_id {
                    doc.order_id = Some(order.id);
                    doc.updated_at = order.created_at;
                    attached += 1;
                }
            }
        }
        Ok(attached)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.state.read().orders.get(id).cloned())
    }

    async fn find_with_documents(
        &self,
        id: &Uuid,
    ) -> Result<Option<OrderWithDocuments>, DomainError> {
        let state = self.state.read();
        Ok(state.orders.get(id).map(|order| state.entry(order)))
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: OrderStatus,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write();
        let order = state
            .orders
            .get_mut(id)
            .ok_or(DomainError::OrderNotFound(*id))?;
        order.status = status;
        order.updated_at = at;
        Ok(())
    }

    async fn apply_review(&self, outcome: &ReviewOutcome) -> Result<(), DomainError> {
        let mut state = self.state.write();

        // Check everything before the first write.
        if !state.orders.contains_key(&outcome.order_id) {
            return Err(DomainError::OrderNotFound(outcome.order_id));
        }
        for decision in &outcome.decisions {
            let member = state
                .documents
                .get(&decision.document_id)
                .is_some_and(|doc| doc.order_id == Some(outcome.order_id));
            if !member {
                return Err(DomainError::DocumentNotFound(decision.document_id));
            }
        }

        for decision in &outcome.decisions {
            if let Some(doc) = state.documents.get_mut(&decision.document_id) {
                outcome.apply_to(doc);
            }
        }
        if let Some(order) = state.orders.get_mut(&outcome.order_id) {
            order.status = outcome.order_status;
            order.updated_at = outcome.decided_at;
        }

        debug!(order_id = %outcome.order_id, status = %outcome.order_status, "Review stored");
        Ok(())
    }

    async fn list_by_organization(
        &self,
        organization_id: &Uuid,
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        let state = self.state.read();
        let mut orders: Vec<&Order> = state
            .orders
            .values()
            .filter(|order| order.organization_id == *organization_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(state.entries(orders.into_iter()))
    }

    async fn list_by_status(
        &self,
        organization_ids: &[Uuid],
        status: OrderStatus,
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        let state = self.state.read();
        let mut orders: Vec<&Order> = state
            .orders
            .values()
            .filter(|order| {
                order.status == status && organization_ids.contains(&order.organization_id)
            })
            .collect();
        match status {
            OrderStatus::ReviewPending => orders.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            _ => orders.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        }
        Ok(state.entries(orders.into_iter()))
    }

    async fn list_for_queue(
        &self,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderWithDocuments>, DomainError> {
        let state = self.state.read();
        let mut orders: Vec<&Order> = state
            .orders
            .values()
            .filter(|order| statuses.contains(&order.status))
            .collect();
        orders.sort_by_key(|order| order.created_at);
        Ok(state.entries(orders.into_iter()))
    }
}
