//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use confession::{
    ConfessionConfig, GatewayConfig, HttpModerationClient, ModerationConfig,
    PgConfessionRepository, ProcessUploadGateway, confession_router,
};
use confession::application::NetworkInfo;
use confession::application::config::DEFAULT_APP_IDENTIFIER;
use platform::identity::IdentityTokenKey;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_millis(key: &str, default_ms: u64) -> anyhow::Result<Duration> {
    let ms = match env_opt(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number of milliseconds"))?,
        None => default_ms,
    };
    Ok(Duration::from_millis(ms))
}

/// Identity token key from `IDENTITY_TOKEN_SECRET`
///
/// Without a secret, debug builds use a random key and release builds
/// reject every bearer token.
fn identity_key() -> anyhow::Result<IdentityTokenKey> {
    let Some(secret_b64) = env_opt("IDENTITY_TOKEN_SECRET") else {
        if cfg!(debug_assertions) {
            tracing::warn!("IDENTITY_TOKEN_SECRET not set, using a random development key");
            return Ok(ConfessionConfig::development().identity_key);
        }
        tracing::warn!("IDENTITY_TOKEN_SECRET not set, bearer tokens will be rejected");
        return Ok(IdentityTokenKey::disabled());
    };

    let secret_bytes = platform::crypto::from_base64(secret_b64.trim())
        .context("IDENTITY_TOKEN_SECRET must be base64")?;
    let secret: [u8; 32] = secret_bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("IDENTITY_TOKEN_SECRET must decode to 32 bytes"))?;
    Ok(IdentityTokenKey::new(secret))
}

fn confession_config() -> anyhow::Result<ConfessionConfig> {
    let defaults = NetworkInfo::default();
    let network = NetworkInfo {
        network: env_or("IRYS_NETWORK", &defaults.network),
        gateway_url: env_or("IRYS_GATEWAY_URL", &defaults.gateway_url),
        rpc_url: env_or("IRYS_RPC_URL", &defaults.rpc_url),
        explorer_url: env_or("IRYS_EXPLORER_URL", &defaults.explorer_url),
        faucet_url: env_or("IRYS_FAUCET_URL", &defaults.faucet_url),
    };

    Ok(ConfessionConfig {
        app_identifier: env_or("APP_IDENTIFIER", DEFAULT_APP_IDENTIFIER),
        identity_key: identity_key()?,
        network,
    })
}

fn gateway_config() -> anyhow::Result<GatewayConfig> {
    let defaults = GatewayConfig::default();
    Ok(GatewayConfig {
        command: env_or("UPLOAD_HELPER_COMMAND", &defaults.command),
        script: env_opt("UPLOAD_HELPER_SCRIPT")
            .map(PathBuf::from)
            .or(defaults.script),
        working_dir: env_opt("UPLOAD_HELPER_DIR").map(PathBuf::from),
        timeout: env_millis("UPLOAD_TIMEOUT_MS", 30_000)?,
    })
}

fn moderation_config() -> anyhow::Result<ModerationConfig> {
    Ok(ModerationConfig {
        api_url: env_opt("MODERATION_API_URL"),
        api_key: env_opt("MODERATION_API_KEY"),
        timeout: env_millis("MODERATION_TIMEOUT_MS", 10_000)?,
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,confession=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", "5")
        .parse()
        .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Collaborators
    let config = confession_config()?;
    let gateway = ProcessUploadGateway::new(gateway_config()?);
    let moderation_config = moderation_config()?;
    let moderation = HttpModerationClient::new(&moderation_config)?;
    if moderation.is_configured() {
        tracing::info!("Moderation service enabled");
    } else {
        tracing::warn!("MODERATION_API_URL not set, confessions will publish unreviewed");
    }

    // CORS configuration
    let frontend_origins = env_or(
        "FRONTEND_ORIGINS",
        "http://localhost:3000,http://127.0.0.1:3000",
    );

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let repo = PgConfessionRepository::new(pool.clone());
    let app = Router::new()
        .nest("/api", confession_router(repo, gateway, moderation, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env_or("BIND_ADDR", "0.0.0.0:8001")
        .parse()
        .context("BIND_ADDR must be host:port")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}
