use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use activities_api::config::AppConfig;
use activities_api::database;
use activities_api::web::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(
        build_id = env!("ACTIVITIES_BUILD_ID"),
        database_url = %config.database_url,
        "starting activities api"
    );

    let pool = database::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("cannot connect to database {}", config.database_url))?;
    database::migrate(&pool)
        .await
        .context("cannot apply database migrations")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("cannot parse bind address {}:{}", config.host, config.port))?;

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback_port = config.port.checked_add(1).context("no fallback port")?;
            let fallback: SocketAddr = format!("{}:{}", config.host, fallback_port)
                .parse()
                .context("cannot parse fallback address")?;
            warn!(%addr, %fallback, error = %e, "bind failed, trying fallback port");
            tokio::net::TcpListener::bind(fallback)
                .await
                .with_context(|| format!("cannot bind {}", fallback))?
        }
    };

    let bound_addr = listener.local_addr()?;
    info!("listening on http://{}/api/v1", bound_addr);

    let app = web::app(AppState::new(pool, config));
    axum::serve(listener, app).await?;
    Ok(())
}
