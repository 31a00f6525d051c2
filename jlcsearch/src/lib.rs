//! # jlcsearch: search the JLCPCB parts catalog
//!
//! `jlcsearch` serves filterable listings of electronic components from a SQLite copy of the
//! JLCPCB parts catalog. Each listing is available both as JSON for API clients and as a small
//! server-rendered HTML page with a filter form for browsers.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! reads the catalog through SQLx. The catalog is read-only from the service's point of view:
//! it is produced by a separate import step, and every request only issues `SELECT`s.
//!
//! ### Request Flow
//!
//! A request to `/voltage_regulators/list` goes through three steps:
//!
//! 1. The query string is deserialized and validated into a filter. Malformed values are rejected
//!    with `400 Bad Request` before the database is touched.
//! 2. The repository ([`db::handlers::VoltageRegulators`]) turns the filter into an immutable
//!    query value, runs it, and separately fetches the distinct package list used by the
//!    form's dropdown.
//! 3. The handler renders the rows in the [`api::models::format::ResponseFormat`] negotiated from
//!    the path suffix and `Accept` header: JSON, or an HTML page rendered by [`views`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use jlcsearch::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = jlcsearch::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     jlcsearch::telemetry::init_telemetry(config.log_format)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod views;

#[cfg(test)]
pub mod test_utils;

use axum::{
    Router,
    http::{HeaderValue, Method},
    response::Redirect,
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use openapi::ApiDoc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};
use views::Views;

/// Application state shared across all request handlers.
///
/// - `db`: connection pool for the catalog database
/// - `config`: application configuration loaded from file/environment
/// - `views`: compiled HTML templates
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    pub views: Arc<Views>,
}

/// Get the catalog database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect to the catalog and apply migrations if configured to.
async fn setup_database(config: &Config) -> anyhow::Result<SqlitePool> {
    let pool = db::connect(config).await?;

    match (config.database.run_migrations, config.database.read_only) {
        (true, false) => {
            migrator().run(&pool).await?;
            debug!("Migrations applied");
        }
        (true, true) => {
            warn!("Database is opened read-only, skipping migrations");
        }
        (false, _) => {
            info!("Migrations disabled by configuration");
        }
    }

    Ok(pool)
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    let allow_origin = if cors_config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            origins.push(origin.parse::<HeaderValue>()?);
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_credentials(cors_config.allow_credentials);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let component_routes = Router::new()
        .route(
            "/voltage_regulators/list",
            get(api::handlers::voltage_regulators::list_voltage_regulators),
        )
        .route(
            "/voltage_regulators/list.json",
            get(api::handlers::voltage_regulators::list_voltage_regulators),
        )
        .with_state(state.clone());

    let mut router = Router::new()
        .route("/", get(|| async { Redirect::temporary("/voltage_regulators/list") }))
        .route("/healthz", get(|| async { "OK" }))
        .merge(component_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(|| async { axum::Json(ApiDoc::openapi()) }));

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    // Outermost first: every request is traced, including CORS preflights
    let router = router.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(create_cors_layer(&state.config)?),
    );

    Ok(router)
}

pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting jlcsearch with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        Self::new_with_pool(config, pool).await
    }

    /// Build the application around an existing pool, e.g. an in-memory database in tests.
    pub async fn new_with_pool(config: Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let views = Views::new().map_err(|e| anyhow::anyhow!("Failed to load templates: {e:#}"))?;

        let app_state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .views(Arc::new(views))
            .build();

        let router = build_router(&app_state)?;

        Ok(Self { router, config, pool })
    }

    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "jlcsearch listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::test_utils::{create_test_app, create_test_pool, seed_regulators};
    use axum::http::{StatusCode, header};

    #[test_log::test(tokio::test)]
    async fn test_healthz() {
        let server = create_test_app(create_test_pool().await).await;

        let response = server.get("/healthz").await;

        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[test_log::test(tokio::test)]
    async fn test_root_redirects_to_regulator_search() {
        let server = create_test_app(create_test_pool().await).await;

        let response = server.get("/").await;

        assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.header("location"), "/voltage_regulators/list");
    }

    #[test_log::test(tokio::test)]
    async fn test_openapi_document_served() {
        let server = create_test_app(create_test_pool().await).await;

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let doc: serde_json::Value = response.json();
        assert!(doc["paths"]["/voltage_regulators/list"]["get"].is_object());
    }

    #[test_log::test(tokio::test)]
    async fn test_cors_allows_any_origin_by_default() {
        let server = create_test_app(create_test_pool().await).await;

        let response = server
            .get("/voltage_regulators/list.json")
            .add_header(header::ORIGIN, "https://parts.example.com")
            .await;

        response.assert_status_ok();
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    }

    #[test_log::test(tokio::test)]
    async fn test_unknown_route_is_not_found() {
        let pool = create_test_pool().await;
        seed_regulators(&pool).await;
        let server = create_test_app(pool).await;

        let response = server.get("/resistors/list").expect_failure().await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_table_is_internal_error() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let server = create_test_app(pool).await;

        let response = server.get("/voltage_regulators/list.json").expect_failure().await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        // no SQL details leak to the client
        response.assert_text("Database error occurred");
    }
}
