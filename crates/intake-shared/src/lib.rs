//! # Intake Shared
//!
//! Configuration, telemetry, and small helpers shared by every intake crate.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
