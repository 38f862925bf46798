// ============================================================================
// Intake Core - Operator Queue Read Model
// File: crates/intake-core/src/domain/queue.rs
// Description: Pure projection of orders for the operator dashboard
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Document, OrderStatus, OrderWithDocuments};

/// Dominant kind of work inside an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueCategory {
    Invoice,
    Statement,
    Other,
}

impl QueueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueCategory::Invoice => "invoice",
            QueueCategory::Statement => "statement",
            QueueCategory::Other => "other",
        }
    }

    /// Buckets a free-form document category (`SALES_INVOICE`, `BANK_STATEMENT`, ...).
    pub fn of_document(category: Option<&str>) -> Self {
        match category.map(str::to_ascii_uppercase) {
            Some(c) if c.contains("INVOICE") => QueueCategory::Invoice,
            Some(c) if c.contains("STATEMENT") => QueueCategory::Statement,
            _ => QueueCategory::Other,
        }
    }

    /// Strict majority over all documents; ties and empty orders fall back to `Other`.
    pub fn classify(documents: &[Document]) -> Self {
        let (mut invoices, mut statements) = (0usize, 0usize);
        for doc in documents {
            match Self::of_document(doc.category.as_deref()) {
                QueueCategory::Invoice => invoices += 1,
                QueueCategory::Statement => statements += 1,
                QueueCategory::Other => {}
            }
        }

        let total = documents.len();
        if invoices * 2 > total {
            QueueCategory::Invoice
        } else if statements * 2 > total {
            QueueCategory::Statement
        } else {
            QueueCategory::Other
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub total: usize,
    pub processed: usize,
    pub pending: usize,
    pub pending_invoices: usize,
    pub pending_statements: usize,
}

impl QueueStats {
    pub fn of(documents: &[Document]) -> Self {
        let mut stats = QueueStats {
            total: documents.len(),
            ..Default::default()
        };
        for doc in documents {
            if doc.status.is_processed() {
                stats.processed += 1;
            } else if doc.status.is_pending() {
                stats.pending += 1;
                match QueueCategory::of_document(doc.category.as_deref()) {
                    QueueCategory::Invoice => stats.pending_invoices += 1,
                    QueueCategory::Statement => stats.pending_statements += 1,
                    QueueCategory::Other => {}
                }
            }
        }
        stats
    }
}

/// One row of the operator queue. `status` is for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorOrderView {
    pub id: Uuid,
    pub order_number: String,
    pub organization_id: Uuid,
    pub client_name: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub category: QueueCategory,
    pub stats: QueueStats,
}

impl OperatorOrderView {
    pub fn project(entry: &OrderWithDocuments) -> Self {
        let stats = QueueStats::of(&entry.documents);
        Self {
            id: entry.order.id,
            order_number: entry.order.order_number.clone(),
            organization_id: entry.order.organization_id,
            client_name: entry.organization_name.clone(),
            created_at: entry.order.created_at,
            status: display_status(entry.order.status, &stats),
            category: QueueCategory::classify(&entry.documents),
            stats,
        }
    }
}

/// An untouched or in-flight order with partial progress shows as `PROCESSING`.
pub fn display_status(persisted: OrderStatus, stats: &QueueStats) -> OrderStatus {
    match persisted {
        OrderStatus::Pending | OrderStatus::Processing
            if stats.pending > 0 && stats.pending < stats.total =>
        {
            OrderStatus::Processing
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentStatus, MediaKind, NewDocument, Order};

    fn doc(status: DocumentStatus, category: Option<&str>) -> Document {
        let mut doc = Document::from_upload(
            NewDocument {
                name: "scan.pdf".to_string(),
                url: "https://files.example.com/scan.pdf".to_string(),
                size_bytes: 10,
                media_kind: MediaKind::Pdf,
                category: category.map(str::to_string),
            },
            Uuid::new_v4(),
        )
        .unwrap();
        doc.status = status;
        doc
    }

    fn entry(status: OrderStatus, documents: Vec<Document>) -> OrderWithDocuments {
        let mut order = Order::new("ORD-000007".to_string(), Uuid::new_v4());
        order.status = status;
        OrderWithDocuments {
            order,
            organization_name: "Acme Ltd".to_string(),
            documents,
        }
    }

    #[test]
    fn test_stats_buckets() {
        let docs = vec![
            doc(DocumentStatus::Completed, Some("SALES_INVOICE")),
            doc(DocumentStatus::QaReview, None),
            doc(DocumentStatus::Uploaded, Some("PURCHASE_INVOICE")),
            doc(DocumentStatus::Processing, Some("BANK_STATEMENT")),
            doc(DocumentStatus::Returned, None),
        ];
        let stats = QueueStats::of(&docs);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.pending_invoices, 1);
        assert_eq!(stats.pending_statements, 1);
    }

    #[test]
    fn test_display_status_partial_progress() {
        let view = OperatorOrderView::project(&entry(
            OrderStatus::Pending,
            vec![
                doc(DocumentStatus::Completed, None),
                doc(DocumentStatus::Uploaded, None),
            ],
        ));
        assert_eq!(view.status, OrderStatus::Processing);
    }

    #[test]
    fn test_display_status_keeps_persisted() {
        let all_pending = entry(
            OrderStatus::Pending,
            vec![doc(DocumentStatus::Uploaded, None), doc(DocumentStatus::Uploaded, None)],
        );
        assert_eq!(OperatorOrderView::project(&all_pending).status, OrderStatus::Pending);

        let returned = entry(
            OrderStatus::Returned,
            vec![doc(DocumentStatus::Returned, None), doc(DocumentStatus::Uploaded, None)],
        );
        assert_eq!(OperatorOrderView::project(&returned).status, OrderStatus::Returned);
    }

    #[test]
    fn test_projection_does_not_touch_order() {
        let e = entry(
            OrderStatus::Pending,
            vec![doc(DocumentStatus::Completed, None), doc(DocumentStatus::Uploaded, None)],
        );
        let first = OperatorOrderView::project(&e);
        let second = OperatorOrderView::project(&e);
        assert_eq!(first, second);
        assert_eq!(e.order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_category_majority() {
        let invoices = vec![
            doc(DocumentStatus::Uploaded, Some("SALES_INVOICE")),
            doc(DocumentStatus::Uploaded, Some("invoice")),
            doc(DocumentStatus::Uploaded, Some("BANK_STATEMENT")),
        ];
        assert_eq!(QueueCategory::classify(&invoices), QueueCategory::Invoice);

        let tie = vec![
            doc(DocumentStatus::Uploaded, Some("INVOICE")),
            doc(DocumentStatus::Uploaded, Some("STATEMENT")),
        ];
        assert_eq!(QueueCategory::classify(&tie), QueueCategory::Other);

        let plurality_only = vec![
            doc(DocumentStatus::Uploaded, Some("STATEMENT")),
            doc(DocumentStatus::Uploaded, Some("IDENTITY_CARD")),
            doc(DocumentStatus::Uploaded, None),
        ];
        assert_eq!(QueueCategory::classify(&plurality_only), QueueCategory::Other);

        assert_eq!(QueueCategory::classify(&[]), QueueCategory::Other);
    }
}
