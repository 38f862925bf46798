// ============================================================================
// Intake Core - Review Decision Processor
// File: crates/intake-core/src/domain/review.rs
// Description: Turns a client batch decision into a validated unit of work
// ============================================================================
//! A review is planned in memory first. [`plan_review`] checks the request
//! against the order and its documents and emits one decision per member
//! document plus the resulting order status. Stores commit a
//! [`ReviewOutcome`] in a single transaction, so a rejected plan never
//! touches persisted state.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use intake_shared::constants::MAX_REJECTION_REASON_LENGTH;

use crate::domain::{Document, Order, OrderStatus};
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewAction {
    ApproveAll,
    RejectPartial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub document_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub action: ReviewAction,
    #[serde(default)]
    pub rejections: Vec<Rejection>,
}

impl ReviewRequest {
    pub fn approve_all() -> Self {
        Self {
            action: ReviewAction::ApproveAll,
            rejections: Vec::new(),
        }
    }

    pub fn reject_partial(rejections: Vec<Rejection>) -> Self {
        Self {
            action: ReviewAction::RejectPartial,
            rejections,
        }
    }
}

/// Final decision for a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Approved,
    Rejected { reason: String },
}

impl ReviewDecision {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ReviewDecision::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDecision {
    pub document_id: Uuid,
    pub decision: ReviewDecision,
}

/// Every write a review performs, committed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub order_id: Uuid,
    pub order_status: OrderStatus,
    pub decisions: Vec<DocumentDecision>,
    pub decided_at: DateTime<Utc>,
}

impl ReviewOutcome {
    pub fn approved_count(&self) -> usize {
        self.decisions
            .iter()
            .filter(|d| !d.decision.is_rejected())
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.decisions.len() - self.approved_count()
    }

    /// Applies the decision for `document` if this outcome covers it.
    pub fn apply_to(&self, document: &mut Document) -> bool {
        let Some(decision) = self
            .decisions
            .iter()
            .find(|d| d.document_id == document.id)
        else {
            return false;
        };

        match &decision.decision {
            ReviewDecision::Approved => document.approve(self.decided_at),
            ReviewDecision::Rejected { reason } => {
                document.reject(reason.clone(), self.decided_at)
            }
        }
        true
    }
}

/// Validates `request` against the order and plans the writes.
pub fn plan_review(
    order: &Order,
    documents: &[Document],
    request: &ReviewRequest,
) -> Result<ReviewOutcome, DomainError> {
    let rejected = match request.action {
        ReviewAction::ApproveAll => {
            if !request.rejections.is_empty() {
                return Err(DomainError::ValidationError(
                    "APPROVE_ALL does not accept rejections".to_string(),
                ));
            }
            HashMap::new()
        }
        ReviewAction::RejectPartial => collect_rejections(documents, &request.rejections)?,
    };

    let order_status = order.status.on_review(!rejected.is_empty())?;

    let decisions = documents
        .iter()
        .map(|doc| DocumentDecision {
            document_id: doc.id,
            decision: match rejected.get(&doc.id) {
                Some(reason) => ReviewDecision::Rejected {
                    reason: reason.clone(),
                },
                None => ReviewDecision::Approved,
            },
        })
        .collect();

    Ok(ReviewOutcome {
        order_id: order.id,
        order_status,
        decisions,
        decided_at: Utc::now(),
    })
}

fn collect_rejections(
    documents: &[Document],
    rejections: &[Rejection],
) -> Result<HashMap<Uuid, String>, DomainError> {
    if rejections.is_empty() {
        return Err(DomainError::ValidationError(
            "REJECT_PARTIAL requires at least one rejection".to_string(),
        ));
    }

    let members: HashSet<Uuid> = documents.iter().map(|d| d.id).collect();
    let mut rejected = HashMap::with_capacity(rejections.len());

    for rejection in rejections {
        let reason = rejection.reason.trim();
        if reason.is_empty() {
            return Err(DomainError::InvalidRejectionReason(rejection.document_id));
        }
        if reason.chars().count() > MAX_REJECTION_REASON_LENGTH {
            return Err(DomainError::ValidationError(format!(
                "Rejection reason for document {} exceeds {} characters",
                rejection.document_id, MAX_REJECTION_REASON_LENGTH
            )));
        }
        if !members.contains(&rejection.document_id) {
            return Err(DomainError::ValidationError(format!(
                "Document {} is not part of this order",
                rejection.document_id
            )));
        }
        if rejected
            .insert(rejection.document_id, reason.to_string())
            .is_some()
        {
            return Err(DomainError::ValidationError(format!(
                "Document {} is rejected more than once",
                rejection.document_id
            )));
        }
    }

    Ok(rejected)
}

/// Collects one decision per document on the client side.
///
/// A request can only be built once every document has a decision; any
/// rejection turns the request into `REJECT_PARTIAL`.
#[derive(Debug, Clone)]
pub struct ReviewDecisionSet {
    document_ids: Vec<Uuid>,
    decisions: HashMap<Uuid, ReviewDecision>,
}

impl ReviewDecisionSet {
    pub fn new(document_ids: Vec<Uuid>) -> Self {
        Self {
            document_ids,
            decisions: HashMap::new(),
        }
    }

    /// Starts from the documents, keeping approvals from an earlier round.
    pub fn from_documents(documents: &[Document]) -> Self {
        let mut set = Self::new(documents.iter().map(|d| d.id).collect());
        for doc in documents {
            if doc.approval_status == Some(crate::domain::ApprovalStatus::Approved) {
                set.decisions.insert(doc.id, ReviewDecision::Approved);
            }
        }
        set
    }

    pub fn approve(&mut self, document_id: Uuid) -> Result<(), DomainError> {
        self.ensure_member(document_id)?;
        self.decisions.insert(document_id, ReviewDecision::Approved);
        Ok(())
    }

    pub fn reject(&mut self, document_id: Uuid, reason: &str) -> Result<(), DomainError> {
        self.ensure_member(document_id)?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::InvalidRejectionReason(document_id));
        }
        self.decisions.insert(
            document_id,
            ReviewDecision::Rejected {
                reason: reason.to_string(),
            },
        );
        Ok(())
    }

    pub fn total(&self) -> usize {
        self.document_ids.len()
    }

    pub fn handled(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.handled() == self.total()
    }

    pub fn into_request(self) -> Result<ReviewRequest, DomainError> {
        if !self.is_complete() {
            return Err(DomainError::ValidationError(format!(
                "{} of {} documents still need a decision",
                self.total() - self.handled(),
                self.total()
            )));
        }

        let rejections: Vec<Rejection> = self
            .document_ids
            .iter()
            .filter_map(|id| match self.decisions.get(id) {
                Some(ReviewDecision::Rejected { reason }) => Some(Rejection {
                    document_id: *id,
                    reason: reason.clone(),
                }),
                _ => None,
            })
            .collect();

        if rejections.is_empty() {
            Ok(ReviewRequest::approve_all())
        } else {
            Ok(ReviewRequest::reject_partial(rejections))
        }
    }

    fn ensure_member(&self, document_id: Uuid) -> Result<(), DomainError> {
        if self.document_ids.contains(&document_id) {
            Ok(())
        } else {
            Err(DomainError::DocumentNotFound(document_id))
        }
    }
}
