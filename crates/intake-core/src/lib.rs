//! # Intake Core
//!
//! Domain entities, the order review state machine, repository traits, and
//! the services that drive them.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
