//! BECC site server.
//!
//! Resolves configuration from the environment once, opens the record and media stores and
//! serves the REST API (public pages, dashboard, Swagger UI).

use std::env;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{build_router, AppState};
use becc_core::config::{
    list_limits_from_env_values, media_dir_from_env_value, site_data_dir_from_env_value,
};
use becc_core::{CoreConfig, SiteService};
use becc_files::MediaStore;

/// Main entry point for the BECC site server
///
/// # Environment Variables
/// - `BECC_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `SITE_DATA_DIR`: Directory holding site records (default: "site_data"; must exist)
/// - `BECC_MEDIA_DIR`: Directory for uploaded media (default: "<SITE_DATA_DIR>/media")
/// - `BECC_ADMIN_API_KEY`: API key for dashboard routes; unset or empty disables the dashboard
/// - `BECC_MAX_LIST_ITEMS`, `BECC_MAX_LIST_ITEM_CHARS`: list field limits
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the site data directory is missing,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("becc=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = env::var("BECC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let site_data_dir = site_data_dir_from_env_value(env::var("SITE_DATA_DIR").ok());
    let media_dir = media_dir_from_env_value(&site_data_dir, env::var("BECC_MEDIA_DIR").ok());
    let list_limits = list_limits_from_env_values(
        env::var("BECC_MAX_LIST_ITEMS").ok(),
        env::var("BECC_MAX_LIST_ITEM_CHARS").ok(),
    )?;
    let cfg = Arc::new(CoreConfig::new(site_data_dir, media_dir, list_limits)?);

    let media = MediaStore::open(cfg.media_dir())?;
    let api_key = env::var("BECC_ADMIN_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("BECC_ADMIN_API_KEY is not set; dashboard routes are disabled");
    }

    tracing::info!(
        site_data_dir = %cfg.site_data_dir().display(),
        media_dir = %media.root_directory().display(),
        "-- Starting BECC site on {}",
        addr
    );

    let app = build_router(AppState::new(SiteService::new(cfg), media, api_key));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
