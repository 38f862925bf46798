//! # Intake Security
//!
//! Verification of the bearer tokens issued by the external session provider.

pub mod jwt;

pub use jwt::{Claims, JwtError, JwtService};
