//! Utility functions

use uuid::Uuid;

use crate::constants::{ORDER_NUMBER_PREFIX, ORDER_NUMBER_WIDTH};

/// Formats a running order count as `ORD-000042`.
pub fn format_order_number(sequence: i64) -> String {
    format!(
        "{}{:0width$}",
        ORDER_NUMBER_PREFIX,
        sequence,
        width = ORDER_NUMBER_WIDTH
    )
}

/// Parses a comma separated list of UUIDs, ignoring blank segments.
pub fn parse_uuid_list(raw: &str) -> Result<Vec<Uuid>, uuid::Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Uuid::parse_str)
        .collect()
}
