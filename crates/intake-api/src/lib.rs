//! # Intake API
//!
//! HTTP handlers, actor extraction, DTOs, and the router.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
