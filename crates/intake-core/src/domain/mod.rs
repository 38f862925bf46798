//! # Intake Core - Domain Module
//!
//! Entities and the pure parts of the order workflow.

pub mod actor;
pub mod organization;
pub mod document;
pub mod order;
pub mod review;
pub mod queue;

// Re-export all entities and enums
pub use actor::{Actor, UserRole};
pub use organization::{Organization, OrganizationKind};
pub use document::{ApprovalStatus, Document, DocumentStatus, MediaKind, NewDocument};
pub use order::{Order, OrderStatus, OrderWithDocuments};
pub use review::{
    plan_review, DocumentDecision, Rejection, ReviewAction, ReviewDecision, ReviewDecisionSet,
    ReviewOutcome, ReviewRequest,
};
pub use queue::{OperatorOrderView, QueueCategory, QueueStats};
