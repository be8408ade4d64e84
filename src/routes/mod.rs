mod admin;
mod health;
mod pages;
mod swagger;
mod users;
use crate::bootstrap;
use crate::database;
use health::health_checker_handler;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{AppState, Config};

use axum::{routing::get, Router};
use std::error::Error;
use std::sync::Arc;

pub async fn make_app() -> Result<(Router, Config), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let config = Config::init();
    info!("Connecting to SQLite at {}...", config.db_url);
    let pool = database::connect_sqlx(&config.db_url).await;
    let db = database::Database::new(pool);
    db.ensure_schema().await?;
    info!("Database ready");

    if config.seed_on_startup {
        match bootstrap::seed_default_users(&db).await {
            Ok(true) => info!("Inserted default employee records"),
            Ok(false) => {}
            Err(e) => warn!("Skipping default data seeding: {e:#}"),
        }
    }

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });
    Ok((build_router(state), config))
}

/// Assembles the full route table over the given state. Shared with the
/// integration tests so they exercise the production router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let dashboard = get(pages::dashboard_handler);
    Router::new()
        .route("/", get(pages::index_handler))
        .route("/dashboard", dashboard.clone())
        .route("/dashboard/", dashboard)
        .route("/api/health", get(health_checker_handler))
        .merge(users::user_routes())
        .merge(admin::admin_routes())
        .merge(swagger::build_documentation())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
