//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgAccountRepository, TokenService};
use axum::{
    Json, Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use gate::{GateConfig, GateState, InMemoryAdmissionStore};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wishlist::PgWishRepository;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,gate=info,wishlist=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration. The signing secret is process-wide and fixed for
    // the lifetime of the server; restarting with a new secret invalidates
    // every outstanding token.
    let auth_config = if cfg!(debug_assertions) {
        match env::var("JWT_SECRET") {
            Ok(secret) => AuthConfig {
                token_secret: secret,
                ..auth_config_from_env()
            },
            Err(_) => AuthConfig::development(),
        }
    } else {
        let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in production");
        AuthConfig {
            token_secret: secret,
            ..auth_config_from_env()
        }
    };
    let auth_config = Arc::new(auth_config);
    let tokens = Arc::new(TokenService::new(&auth_config));

    // Admission control state: process-scoped, built exactly once here, and
    // only reachable through the gate middleware
    let gate_config = gate_config_from_env();
    let max_body_bytes = gate_config.max_body_bytes;
    let gate_state = GateState {
        store: Arc::new(InMemoryAdmissionStore::new(gate_config)),
        max_body_bytes,
    };

    let account_repo = PgAccountRepository::new(pool.clone());
    let wish_repo = PgWishRepository::new(pool.clone());

    let auth_mw_state = auth::middleware::AuthMiddlewareState {
        repo: Arc::new(account_repo.clone()),
        tokens: tokens.clone(),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Protected resource routes get the bearer-auth guard; auth and health
    // endpoints stay open
    let wishes = wishlist::wishlist_router(wish_repo).route_layer(middleware::from_fn_with_state(
        auth_mw_state,
        auth::middleware::require_bearer_auth::<PgAccountRepository>,
    ));

    // Build router. Layer order (outermost first): size check, security
    // headers, admission control, suspicious-pattern logging.
    let app = Router::new()
        .route("/api/health", get(health))
        .nest("/api/auth", auth::auth_router(account_repo, tokens, auth_config))
        .nest("/api/wishes", wishes)
        .layer(middleware::from_fn(gate::middleware::observe_suspicious))
        .layer(middleware::from_fn_with_state(
            gate_state.clone(),
            gate::middleware::admission,
        ))
        .layer(middleware::from_fn(gate::middleware::security_headers))
        .layer(middleware::from_fn_with_state(
            gate_state,
            gate::middleware::enforce_body_limit,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Token policy knobs from the environment, secret handled by the caller
fn auth_config_from_env() -> AuthConfig {
    let mut config = AuthConfig::default();

    if let Ok(algo) = env::var("JWT_ALGO") {
        config.token_algorithm = auth::config::Algorithm::from_str(&algo)
            .unwrap_or_else(|_| panic!("unsupported JWT_ALGO: {algo}"));
    }
    if let Some(minutes) = env_parse::<u64>("JWT_EXP_MINUTES") {
        config.token_expiry = Duration::from_secs(minutes * 60);
    }
    if let Ok(pepper) = env::var("PASSWORD_PEPPER") {
        config.password_pepper = Some(pepper.into_bytes());
    }

    config
}

/// Admission policy knobs from the environment
fn gate_config_from_env() -> GateConfig {
    let mut config = GateConfig::default();

    if let Some(rpm) = env_parse("RATE_REQUESTS_PER_MINUTE") {
        config.requests_per_minute = rpm;
    }
    if let Some(burst) = env_parse("RATE_BURST_LIMIT") {
        config.burst_limit = burst;
    }
    if let Some(max) = env_parse("MAX_BODY_BYTES") {
        config.max_body_bytes = max;
    }
    if let Some(clients) = env_parse("MAX_TRACKED_CLIENTS") {
        config.max_tracked_clients = clients;
    }

    config
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
