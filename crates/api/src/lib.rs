//! # slotbook API
//!
//! The HTTP surface of the slotbook booking backend: slot generation and listing for
//! authenticated businesses, plus read-only public listings for customers.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into repository and pipeline calls
//! - **Generation**: The validate → synthesize → persist pipeline
//! - **Middleware**: Bearer-token authentication and error mapping
//! - **Config**: Environment-driven settings
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Slot generation pipeline
pub mod generation;
/// Request handlers
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use eyre::{Result, WrapErr};
use slotbook_db::repositories::{PgSlotRepository, SlotRepository};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::middleware::auth::JwtVerifier;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for the listing endpoints
    pub db_pool: PgPool,
    /// Lookups and batch writes used by slot generation
    pub slot_repo: Arc<dyn SlotRepository>,
    /// Bearer-token verifier for protected routes
    pub jwt: JwtVerifier,
}

impl ApiState {
    /// Builds production state backed by Postgres.
    pub fn new(db_pool: PgPool, jwt_secret: &str) -> Self {
        Self {
            slot_repo: Arc::new(PgSlotRepository::new(db_pool.clone())),
            db_pool,
            jwt: JwtVerifier::new(jwt_secret),
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot generation and listing endpoints
        .merge(routes::slots::routes(state.clone()))
        // Service listing endpoints
        .merge(routes::services::routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Logging is expected to be initialized by the caller.
///
/// # Errors
///
/// Fails when a CORS origin is not a valid header value, or when the listener cannot
/// bind or serve.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let state = Arc::new(ApiState::new(db_pool, &config.jwt_secret));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid origin in API_CORS_ORIGINS")?;

        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Bound every request. A timed-out generation drops its transaction and rolls back
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
