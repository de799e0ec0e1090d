//! Delivery entry-point: loads settings, prepares storage and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use delivery::inbound::http::health::HealthState;
use delivery::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("load server settings")?;
    let mut config = ServerConfig::from_settings(&settings);

    match settings.database_url() {
        Some(url) => {
            let pool = DbPool::connect(&PoolConfig::new(url))
                .await
                .wrap_err("connect to database")?;
            run_pending_migrations(url)
                .await
                .wrap_err("apply database migrations")?;
            config = config.with_db_pool(pool);
        }
        None => info!("no database configured; serving in-memory fixtures"),
    }

    info!(bind_addr = %config.bind_addr(), "starting delivery server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("start HTTP server")?;
    server.await.wrap_err("HTTP server failed")?;
    Ok(())
}
