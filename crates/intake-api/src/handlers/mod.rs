//! HTTP handlers

pub mod documents;
pub mod health;
pub mod operator;
pub mod orders;
