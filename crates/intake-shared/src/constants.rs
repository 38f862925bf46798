//! Application-wide constants

pub const ORDER_NUMBER_PREFIX: &str = "ORD-";
pub const ORDER_NUMBER_WIDTH: usize = 6;
pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;
pub const MAX_REJECTION_REASON_LENGTH: usize = 1000;
