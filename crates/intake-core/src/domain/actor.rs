// ============================================================================
// Intake Core - Actor
// File: crates/intake-core/src/domain/actor.rs
// Description: Session-derived caller context passed into every service call
// ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Manager,
    EntryOperator,
    Client,
    Employee,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "SUPER_ADMIN",
            UserRole::Admin => "ADMIN",
            UserRole::Manager => "MANAGER",
            UserRole::EntryOperator => "ENTRY_OPERATOR",
            UserRole::Client => "CLIENT",
            UserRole::Employee => "EMPLOYEE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SUPER_ADMIN" => Some(UserRole::SuperAdmin),
            "ADMIN" => Some(UserRole::Admin),
            "MANAGER" => Some(UserRole::Manager),
            "ENTRY_OPERATOR" => Some(UserRole::EntryOperator),
            "CLIENT" => Some(UserRole::Client),
            "EMPLOYEE" => Some(UserRole::Employee),
            _ => None,
        }
    }

    /// Back-office roles that work on orders of every tenant.
    pub fn is_staff(&self) -> bool {
        matches!(
            self,
            UserRole::SuperAdmin | UserRole::Admin | UserRole::Manager | UserRole::EntryOperator
        )
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Client
    }
}

/// The authenticated caller of a service operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    /// Membership organization, if the user is a member of one.
    pub organization_id: Option<Uuid>,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, organization_id: Option<Uuid>, role: UserRole) -> Self {
        Self {
            user_id,
            organization_id,
            role,
        }
    }

    /// Only the operator desk roles read the work queue; SUPER_ADMIN does not.
    pub fn can_view_operator_queue(&self) -> bool {
        matches!(
            self.role,
            UserRole::Admin | UserRole::Manager | UserRole::EntryOperator
        )
    }
}
