//! Study tracker server entry point.

mod server;

use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use study_tracker::inbound::http::session_config::{BuildMode, session_settings_from_env};
use study_tracker::outbound::persistence::{DbPool, PoolConfig};
use study_tracker::settings::AppSettings;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("loading settings: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .wrap_err("validating session settings")?;
    info!(fingerprint = %session.key_fingerprint(), "session key loaded");

    let mut config = ServerConfig::new(session, settings.bind_addr())
        .with_session_ttl_hours(settings.session_ttl_hours());
    if let Some(url) = settings.database_url() {
        let pool = DbPool::new(
            PoolConfig::new(url)
                .with_max_size(settings.pool_max_size())
                .with_connection_timeout(settings.store_timeout()),
        )
        .await
        .wrap_err("building database pool")?;
        config = config.with_db_pool(pool, settings.store_timeout());
    }

    info!(bind_addr = settings.bind_addr(), "starting server");
    create_server(config).await?.await?;
    Ok(())
}
