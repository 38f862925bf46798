// ============================================================================
// Intake API - Application State
// File: crates/intake-api/src/state.rs
// ============================================================================
//! Shared application state handed to every handler.

use std::sync::Arc;

use intake_core::repositories::{DocumentRepository, OrderRepository, OrganizationRepository};
use intake_core::services::{DocumentService, OperatorQueueService, OrderPolicy, OrderService};
use intake_security::JwtService;
use intake_shared::config::AppConfig;

pub type SharedOrderService = OrderService<dyn OrderRepository, dyn OrganizationRepository>;
pub type SharedQueueService = OperatorQueueService<dyn OrderRepository>;
pub type SharedDocumentService = DocumentService<dyn DocumentRepository, dyn OrganizationRepository>;

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<SharedOrderService>,
    pub queue: Arc<SharedQueueService>,
    pub documents: Arc<SharedDocumentService>,
    pub jwt: Arc<JwtService>,
    pub config: AppConfig,
}

impl AppState {
    /// Wires the services over whichever storage backend was chosen.
    pub fn new(
        config: AppConfig,
        orders: Arc<dyn OrderRepository>,
        documents: Arc<dyn DocumentRepository>,
        organizations: Arc<dyn OrganizationRepository>,
    ) -> Self {
        let policy = OrderPolicy {
            require_processed_on_submit: config.orders.require_processed_on_submit,
        };
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        Self {
            orders: Arc::new(OrderService::new(
                Arc::clone(&orders),
                Arc::clone(&organizations),
                policy,
            )),
            queue: Arc::new(OperatorQueueService::new(orders)),
            documents: Arc::new(DocumentService::new(documents, organizations)),
            jwt: Arc::new(jwt),
            config,
        }
    }
}
