//! Domain services (business logic)

pub mod organization_resolver;
pub mod order_service;
pub mod operator_queue_service;
pub mod document_service;

pub use organization_resolver::OrganizationResolver;
pub use order_service::{OrderPolicy, OrderService};
pub use operator_queue_service::OperatorQueueService;
pub use document_service::DocumentService;
