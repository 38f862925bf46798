// ============================================================================
// Intake API - Actor Extractor
// File: crates/intake-api/src/extract.rs
// ============================================================================
//! Actor extraction from the bearer token.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use intake_core::{Actor, DomainError, UserRole};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, built from the `sub`, `org` and `role` claims.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(DomainError::Unauthorized)?;

        let claims = state.jwt.validate_token(token)?;
        let user_id = claims.user_id()?;
        let organization_id = claims.organization_id()?;
        let role = UserRole::from_str(&claims.role)
            .ok_or_else(|| ApiError::Unauthorized(format!("Unknown role {}", claims.role)))?;

        Ok(CurrentActor(Actor::new(user_id, organization_id, role)))
    }
}
