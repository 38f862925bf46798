// ============================================================================
// Intake Infrastructure - PostgreSQL Organization Repository
// File: crates/intake-infrastructure/src/database/postgres/organization_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{PgPool, FromRow};
use uuid::Uuid;
use tracing::error;
use chrono::{DateTime, Utc};

use intake_core::domain::{Organization, OrganizationKind};
use intake_core::error::DomainError;
use intake_core::repositories::OrganizationRepository;

use super::parse_stored;

pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub owner_id: Option<Uuid>,
    pub credits: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = DomainError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        Ok(Organization {
            id: row.id,
            name: row.name,
            kind: parse_stored(&row.kind, "kind", OrganizationKind::from_str)?,
            owner_id: row.owner_id,
            credits: row.credits,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(
            r#"
            SELECT id, name, kind, owner_id, credits, created_at
            FROM organizations
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding organization by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Organization::try_from).transpose()
    }

    async fn find_owned_by(&self, user_id: &Uuid) -> Result<Vec<Organization>, DomainError> {
        let rows: Vec<OrganizationRow> = sqlx::query_as(
            r#"
            SELECT id, name, kind, owner_id, credits, created_at
            FROM organizations
            WHERE owner_id = $1
            ORDER BY created_at ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing owned organizations: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Organization::try_from).collect()
    }

    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError> {
        let row: OrganizationRow = sqlx::query_as(
            r#"
            INSERT INTO organizations (id, name, kind, owner_id, credits, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, kind, owner_id, credits, created_at
            "#
        )
        .bind(organization.id)
        .bind(&organization.name)
        .bind(organization.kind.as_str())
        .bind(organization.owner_id)
        .bind(organization.credits)
        .bind(organization.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating organization: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Organization::try_from(row)
    }
}
