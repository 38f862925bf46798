// ============================================================================
// Intake Core - Organization
// File: crates/intake-core/src/domain/organization.rs
// ============================================================================
//! Organization domain entity (tenant boundary)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationKind {
    Client,
    MasterClient,
    SubClient,
}

impl OrganizationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationKind::Client => "CLIENT",
            OrganizationKind::MasterClient => "MASTER_CLIENT",
            OrganizationKind::SubClient => "SUB_CLIENT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CLIENT" => Some(OrganizationKind::Client),
            "MASTER_CLIENT" => Some(OrganizationKind::MasterClient),
            "SUB_CLIENT" => Some(OrganizationKind::SubClient),
            _ => None,
        }
    }
}

impl Default for OrganizationKind {
    fn default() -> Self {
        OrganizationKind::Client
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Organization {
    pub id: Uuid,

    #[validate(length(min = 2, max = 200, message = "Organization name must be between 2 and 200 characters"))]
    pub name: String,

    pub kind: OrganizationKind,
    pub owner_id: Option<Uuid>,

    /// Carried for display; never computed on here.
    pub credits: i64,

    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(
        name: String,
        kind: OrganizationKind,
        owner_id: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let organization = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            kind,
            owner_id,
            credits: 0,
            created_at: Utc::now(),
        };

        organization.validate()?;
        Ok(organization)
    }
}
