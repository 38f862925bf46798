//! PostgreSQL repository implementations

pub mod organization_repo_impl;
pub mod document_repo_impl;
pub mod order_repo_impl;

use intake_core::error::DomainError;
use tracing::error;

pub use organization_repo_impl::PgOrganizationRepository;
pub use document_repo_impl::PgDocumentRepository;
pub use order_repo_impl::PgOrderRepository;

/// Maps a stored enum string back to its closed enum. An unknown value means
/// the row was written by something else and is reported, not guessed.
pub(crate) fn parse_stored<T>(
    value: &str,
    column: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, DomainError> {
    parse(value).ok_or_else(|| {
        error!(column, value, "Unknown value stored in enum column");
        DomainError::DatabaseError(format!("unknown {} value '{}'", column, value))
    })
}
