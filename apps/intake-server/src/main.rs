use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use intake_api::{build_router, AppState};
use intake_core::repositories::{DocumentRepository, OrderRepository, OrganizationRepository};
use intake_infrastructure::{
    create_pool, run_migrations, MemoryStore, PgDocumentRepository, PgOrderRepository,
    PgOrganizationRepository,
};
use intake_shared::config::AppConfig;
use intake_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_telemetry(&config.logging)?;

    info!(env = %config.app.env, "Intake server starting...");

    let state = if config.database.is_in_memory() {
        warn!("Using the in-memory store; data is lost on restart");
        let store = Arc::new(MemoryStore::new());
        AppState::new(config.clone(), store.clone(), store.clone(), store)
    } else {
        info!("Connecting to database...");
        let pool = create_pool(&config.database)
            .await
            .context("Failed to connect to database")?;
        info!("Database connection established.");

        if config.database.run_migrations {
            run_migrations(&pool).await?;
        }

        let orders: Arc<dyn OrderRepository> = Arc::new(PgOrderRepository::new(pool.clone()));
        let documents: Arc<dyn DocumentRepository> =
            Arc::new(PgDocumentRepository::new(pool.clone()));
        let organizations: Arc<dyn OrganizationRepository> =
            Arc::new(PgOrganizationRepository::new(pool));
        AppState::new(config.clone(), orders, documents, organizations)
    };

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
