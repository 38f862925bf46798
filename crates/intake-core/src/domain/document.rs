// ============================================================================
// Intake Core - Document Entity
// File: crates/intake-core/src/domain/document.rs
// Description: One uploaded file with its processing and approval status
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Document processing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Uploaded,
    Pending,
    Processing,
    ReviewRequired,
    QaReview,
    Completed,
    Returned,
    Failed,
    Deleted,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Uploaded => "UPLOADED",
            DocumentStatus::Pending => "PENDING",
            DocumentStatus::Processing => "PROCESSING",
            DocumentStatus::ReviewRequired => "REVIEW_REQUIRED",
            DocumentStatus::QaReview => "QA_REVIEW",
            DocumentStatus::Completed => "COMPLETED",
            DocumentStatus::Returned => "RETURNED",
            DocumentStatus::Failed => "FAILED",
            DocumentStatus::Deleted => "DELETED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UPLOADED" => Some(DocumentStatus::Uploaded),
            "PENDING" => Some(DocumentStatus::Pending),
            "PROCESSING" => Some(DocumentStatus::Processing),
            "REVIEW_REQUIRED" => Some(DocumentStatus::ReviewRequired),
            "QA_REVIEW" => Some(DocumentStatus::QaReview),
            "COMPLETED" => Some(DocumentStatus::Completed),
            "RETURNED" => Some(DocumentStatus::Returned),
            "FAILED" => Some(DocumentStatus::Failed),
            "DELETED" => Some(DocumentStatus::Deleted),
            _ => None,
        }
    }

    /// Operator work is done (finalized or waiting for a second look).
    pub fn is_processed(&self) -> bool {
        matches!(
            self,
            DocumentStatus::Completed | DocumentStatus::ReviewRequired | DocumentStatus::QaReview
        )
    }

    /// Still waiting for operator work.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            DocumentStatus::Processing | DocumentStatus::Pending | DocumentStatus::Uploaded
        )
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Uploaded
    }
}

/// Client approval of a processed document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "PENDING",
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::Rejected => "REJECTED",
        }
    }

    /// `DENIED` is the legacy spelling of `REJECTED`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(ApprovalStatus::Pending),
            "APPROVED" => Some(ApprovalStatus::Approved),
            "REJECTED" | "DENIED" => Some(ApprovalStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    Pdf,
    Image,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Pdf => "PDF",
            MediaKind::Image => "IMAGE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PDF" => Some(MediaKind::Pdf),
            "IMAGE" => Some(MediaKind::Image),
            _ => None,
        }
    }
}

/// Document entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub size_bytes: i64,
    pub media_kind: MediaKind,
    pub organization_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub category: Option<String>,
    pub status: DocumentStatus,
    pub approval_status: Option<ApprovalStatus>,
    pub rejection_reason: Option<String>,
    pub order_id: Option<Uuid>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Metadata of a file already stored by the blob store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDocument {
    #[validate(length(min = 1, max = 255, message = "Document name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(url(message = "Storage URL must be a valid URL"))]
    pub url: String,

    #[validate(range(min = 0, message = "Size cannot be negative"))]
    pub size_bytes: i64,

    pub media_kind: MediaKind,

    #[validate(length(max = 100, message = "Category too long"))]
    pub category: Option<String>,
}

impl Document {
    /// Validates the trimmed upload, so a whitespace-only name is rejected.
    pub fn from_upload(
        mut upload: NewDocument,
        organization_id: Uuid,
    ) -> Result<Self, validator::ValidationErrors> {
        upload.name = upload.name.trim().to_string();
        upload.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: upload.name,
            url: upload.url,
            size_bytes: upload.size_bytes,
            media_kind: upload.media_kind,
            organization_id,
            assigned_to: None,
            category: upload
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            status: DocumentStatus::Uploaded,
            approval_status: None,
            rejection_reason: None,
            order_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn approve(&mut self, at: DateTime<Utc>) {
        self.approval_status = Some(ApprovalStatus::Approved);
        self.rejection_reason = None;
        self.status = DocumentStatus::Completed;
        self.updated_at = at;
    }

    pub fn reject(&mut self, reason: String, at: DateTime<Utc>) {
        self.approval_status = Some(ApprovalStatus::Rejected);
        self.rejection_reason = Some(reason);
        self.status = DocumentStatus::Returned;
        self.updated_at = at;
    }

    /// A rejected document always carries a non-empty reason.
    pub fn is_consistent(&self) -> bool {
        match self.approval_status {
            Some(ApprovalStatus::Rejected) => self
                .rejection_reason
                .as_deref()
                .is_some_and(|r| !r.trim().is_empty()),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> NewDocument {
        NewDocument {
            name: "invoice-001.pdf".to_string(),
            url: "https://files.example.com/invoice-001.pdf".to_string(),
            size_bytes: 2048,
            media_kind: MediaKind::Pdf,
            category: Some("SALES_INVOICE".to_string()),
        }
    }

    #[test]
    fn test_from_upload() {
        let org = Uuid::new_v4();
        let doc = Document::from_upload(upload(), org).unwrap();
        assert_eq!(doc.status, DocumentStatus::Uploaded);
        assert_eq!(doc.organization_id, org);
        assert!(doc.order_id.is_none());
        assert!(doc.approval_status.is_none());
    }

    #[test]
    fn test_from_upload_trims_name() {
        let mut padded = upload();
        padded.name = "  scan-01.pdf ".to_string();
        let doc = Document::from_upload(padded, Uuid::new_v4()).unwrap();
        assert_eq!(doc.name, "scan-01.pdf");

        let mut blank = upload();
        blank.name = "   ".to_string();
        assert!(Document::from_upload(blank, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_from_upload_rejects_bad_url() {
        let mut bad = upload();
        bad.url = "not a url".to_string();
        assert!(Document::from_upload(bad, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_blank_category_dropped() {
        let mut input = upload();
        input.category = Some("   ".to_string());
        let doc = Document::from_upload(input, Uuid::new_v4()).unwrap();
        assert!(doc.category.is_none());
    }

    #[test]
    fn test_approve_then_reject() {
        let mut doc = Document::from_upload(upload(), Uuid::new_v4()).unwrap();
        let now = Utc::now();

        doc.reject("blurry image".to_string(), now);
        assert_eq!(doc.status, DocumentStatus::Returned);
        assert_eq!(doc.approval_status, Some(ApprovalStatus::Rejected));
        assert!(doc.is_consistent());

        doc.approve(now);
        assert_eq!(doc.status, DocumentStatus::Completed);
        assert_eq!(doc.approval_status, Some(ApprovalStatus::Approved));
        assert!(doc.rejection_reason.is_none());
    }

    #[test]
    fn test_denied_alias() {
        assert_eq!(ApprovalStatus::from_str("DENIED"), Some(ApprovalStatus::Rejected));
    }

    #[test]
    fn test_status_buckets() {
        assert!(DocumentStatus::QaReview.is_processed());
        assert!(DocumentStatus::Uploaded.is_pending());
        assert!(!DocumentStatus::Returned.is_processed());
        assert!(!DocumentStatus::Returned.is_pending());
    }
}
