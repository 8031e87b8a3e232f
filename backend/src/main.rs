//! Backend entry-point: loads settings, migrates the database and serves the
//! REST API with OpenAPI docs.

mod server;

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use trustyhire::inbound::http::health::HealthState;
use trustyhire::outbound::identity::JwtIdentityVerifier;
use trustyhire::outbound::mail::SmtpNotifier;
use trustyhire::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use trustyhire::outbound::storage::CloudinaryResumeStorage;
use trustyhire::settings::AppSettings;
use zeroize::Zeroizing;

use server::{ServerConfig, create_server};

const STORAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server stopped with an error")
}

async fn build_server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let bind_addr = settings.bind_addr()?;
    let database_url = settings.database_url()?;

    run_pending_migrations(database_url)
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(settings.db_max_connections())
            .with_connection_timeout(settings.db_connection_timeout())
            .with_query_timeout(settings.db_query_timeout()),
    )
    .await
    .wrap_err("failed to build database pool")?;

    let jwt_key = Zeroizing::new(settings.jwt_key()?);
    let identity = JwtIdentityVerifier::new(
        &jwt_key,
        settings.jwt_issuer(),
        settings.jwt_audience(),
    )?;
    let mut config = ServerConfig::new(bind_addr, pool, Arc::new(identity))
        .with_resume_max_bytes(settings.resume_max_bytes());

    match settings.smtp() {
        Some(smtp) => {
            config = config.with_notifier(Arc::new(SmtpNotifier::new(&smtp)?));
        }
        None => warn!("SMTP host not configured; notifications are disabled"),
    }
    match settings.storage() {
        Some(credentials) => {
            let storage =
                CloudinaryResumeStorage::new(credentials, STORAGE_TIMEOUT, Arc::new(DefaultClock))
                    .wrap_err("failed to build resume storage client")?;
            config = config.with_resume_storage(Arc::new(storage));
        }
        None => warn!("object store not configured; resume uploads are disabled"),
    }

    info!(%bind_addr, "configuration loaded");
    Ok(config)
}
