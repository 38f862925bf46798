//! # Intake Infrastructure
//!
//! Storage adapters for the repository ports: PostgreSQL and an in-memory store.

pub mod database;
pub mod memory;

pub use database::{
    create_pool, run_migrations, PgDocumentRepository, PgOrderRepository,
    PgOrganizationRepository,
};
pub use memory::MemoryStore;
