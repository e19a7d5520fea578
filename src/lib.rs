pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod geolocate;
pub mod http;
pub mod middleware;
pub mod models;
pub mod state;
pub mod stats;
pub mod validation;

use std::{net::SocketAddr, time::Duration};

use axum::{Router, http::StatusCode, middleware as axum_middleware};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    errors::AppError,
    middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware},
    state::AppState,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Full application router with middleware, without binding a listener.
pub fn app(state: AppState) -> Router {
    let global_rate_limiter = create_global_rate_limiter();
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(http::create_http_routes(state))
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    let postgres = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to Postgres: {e}")))?;

    sqlx::migrate!("./migrations")
        .run(&postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {e}")))?;

    if config.ipstack_key.is_none() {
        tracing::warn!("IPSTACK_KEY not set, IP geolocation is disabled");
    }

    let port = config.port;
    let state = AppState::new(postgres, config);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {port}: {e}")))?;

    tracing::info!("Listening on 0.0.0.0:{port}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::EnvError(format!("Server error: {e}")))
}
