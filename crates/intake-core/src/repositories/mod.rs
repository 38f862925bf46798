//! Repository traits (ports)

pub mod organization_repository;
pub mod document_repository;
pub mod order_repository;

pub use organization_repository::OrganizationRepository;
pub use document_repository::DocumentRepository;
pub use order_repository::OrderRepository;

#[cfg(test)]
pub use organization_repository::MockOrganizationRepository;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
