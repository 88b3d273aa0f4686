mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use parlor_api::AppStateInner;
use parlor_api::session::SessionConfig;
use parlor_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .init();

    let db = Database::open(&config.data_dir)?;

    let ttl = chrono::Duration::try_hours(config.session_ttl_hours)
        .ok_or_else(|| anyhow::anyhow!("session TTL out of range: {}h", config.session_ttl_hours))?;
    let session = match &config.session_secret {
        Some(secret) => SessionConfig::new(secret.as_bytes(), ttl),
        None => {
            warn!("PARLOR_SESSION_SECRET not set; sessions will not survive a restart");
            SessionConfig::ephemeral(ttl)
        }
    }
    .with_secure_cookie(config.secure_cookie);

    let state = Arc::new(AppStateInner {
        db,
        session,
        locale: config.locale,
    });

    let app = parlor_api::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        debug = config.debug,
        data_dir = %config.data_dir.display(),
        "Parlor listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
