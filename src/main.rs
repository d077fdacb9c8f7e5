use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    middleware::from_fn,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use fulmega_directory::config::{self, AppConfig};
use fulmega_directory::database::DatabaseManager;
use fulmega_directory::handlers::{elevated, protected, public};
use fulmega_directory::middleware::{jwt_auth_middleware, require_admin, require_super_admin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .init();

    let config = config::config();
    tracing::info!("Starting Fulmega directory in {:?} mode", config.environment);

    if config.database.run_migrations {
        // A missing database must not stop the server; /health reports it
        if let Err(e) = DatabaseManager::migrate().await {
            tracing::error!("Skipping migrations: {}", e);
        }
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Fulmega directory listening on http://{}", bind_addr);

    axum::serve(listener, app(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    DatabaseManager::close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

fn app(config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected (admin) and elevated (superadmin)
        .merge(admin_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(config));

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();
    CorsLayer::permissive().allow_origin(origins)
}

fn public_routes() -> Router {
    use public::{auth, catalog, legal};

    Router::new()
        .route("/api/categories", get(catalog::categories_get))
        .route("/api/categories/:id/sections", get(catalog::sections_get))
        .route("/api/entries", get(catalog::entries_get))
        .route("/api/catalog", get(catalog::catalog_get))
        .route("/api/legal/:page_type", get(legal::legal_get))
        .route("/auth/login", post(auth::login_post))
}

fn admin_routes() -> Router {
    use protected::{auth, categories, dashboard, entries, sections, tags};

    let content = Router::new()
        .route("/api/admin/dashboard", get(dashboard::dashboard_get))
        .route("/api/admin/entries", get(entries::list).post(entries::post))
        .route("/api/admin/entries/:id", get(entries::get).put(entries::put).delete(entries::delete))
        .route("/api/admin/categories", get(categories::list).post(categories::post))
        .route(
            "/api/admin/categories/:id",
            get(categories::get).put(categories::put).delete(categories::delete),
        )
        .route("/api/admin/sections", get(sections::list).post(sections::post))
        .route("/api/admin/sections/:id", put(sections::put).delete(sections::delete))
        .route("/api/admin/tags", get(tags::list).post(tags::post))
        .route("/api/admin/tags/:id", put(tags::put).delete(tags::delete))
        .route_layer(from_fn(require_admin));

    let superadmin = Router::new()
        .route("/api/admin/legal", get(elevated::legal::list))
        .route("/api/admin/legal/:page_type", put(elevated::legal::put))
        .route("/api/admin/users", get(elevated::users::list))
        .route("/api/admin/users/:id/role", put(elevated::users::role_put))
        .route("/api/admin/settings", get(elevated::settings::get).put(elevated::settings::put))
        .route_layer(from_fn(require_super_admin));

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami_get))
        .merge(content)
        .merge(superadmin)
        // Runs before the role gates above
        .route_layer(from_fn(jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Fulmega directory",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Personal directory of prompts, tools, workflows and resources",
            "endpoints": {
                "catalog": "/api/catalog?category=&section=&q= (public)",
                "taxonomy": "/api/categories, /api/categories/:id/sections (public)",
                "entries": "/api/entries?limit= (public)",
                "legal": "/api/legal/:page_type (public)",
                "login": "/auth/login (public - token acquisition)",
                "admin": "/api/admin/* (protected - admin role)",
                "superadmin": "/api/admin/{legal,users,settings} (elevated - superadmin role)",
            }
        }
    }))
}

async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": { "status": "degraded", "timestamp": now, "database_error": e.to_string() }
            })),
        ),
    }
}
