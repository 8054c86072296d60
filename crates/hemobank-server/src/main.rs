use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod models;
mod routes;

use adapters::postgres::{PgDonorRepository, PgInventoryRepository, PgRequestRepository};
use application::{DashboardService, DonorService, InventoryService, RequestService};

/// Type aliases for application services with concrete repository implementations
pub type AppDonorService = DonorService<PgDonorRepository>;
pub type AppInventoryService = InventoryService<PgInventoryRepository>;
pub type AppRequestService = RequestService<PgRequestRepository, PgInventoryRepository>;
pub type AppDashboardService =
    DashboardService<PgDonorRepository, PgInventoryRepository, PgRequestRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub donor_service: Arc<AppDonorService>,
    pub inventory_service: Arc<AppInventoryService>,
    pub request_service: Arc<AppRequestService>,
    pub dashboard_service: Arc<AppDashboardService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Hemobank API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Hemobank API initializing...");

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    // Run migrations
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize repositories and application services
    let donor_repo = Arc::new(PgDonorRepository::new(pool.clone()));
    let inventory_repo = Arc::new(PgInventoryRepository::new(pool.clone()));
    let request_repo = Arc::new(PgRequestRepository::new(pool.clone()));

    let donor_service = Arc::new(DonorService::new(donor_repo.clone()));
    let inventory_service = Arc::new(InventoryService::new(inventory_repo.clone()));
    let request_service = Arc::new(RequestService::new(
        request_repo.clone(),
        inventory_service.clone(),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        donor_repo,
        inventory_repo,
        request_repo,
    ));

    // Seed ledger records for every canonical blood group
    inventory_service.initialize_blood_groups().await?;
    tracing::info!("Blood group ledger seeded");

    let state = AppState {
        donor_service,
        inventory_service,
        request_service,
        dashboard_service,
    };

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::donor::router())
        .merge(routes::inventory::router())
        .merge(routes::request::router())
        .merge(routes::dashboard::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = std::env::var("HEMOBANK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Hemobank API listening on {}", addr);
    tracing::info!("Swagger UI: /swagger-ui");

    axum::serve(listener, router).await?;

    Ok(())
}
