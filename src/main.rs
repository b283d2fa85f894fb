//! Launch Tracker
//!
//! Collects landing-page events and serves the dashboard:
//! - POST /api/waitlist and /api/pageview append leads and page views
//! - GET /api/stats aggregates both tables for the dashboard
//! - Landing page, dashboard and assets served from the static directory

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use api::{router, AppState};
use service::StatsFailurePolicy;
use store::{RecordStore, SqliteStore, StoreConfig};
use telemetry::{health, init_tracing_from_env};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Trust `X-Forwarded-For` / `X-Real-IP` when resolving client IPs
    #[serde(default = "default_trust_proxy")]
    trust_proxy: bool,

    /// Directory with index.html, dashboard.html and assets
    #[serde(default = "default_static_dir")]
    static_dir: String,

    /// `fail` or `degrade` when a /api/stats query errors
    #[serde(default)]
    stats_failure_policy: StatsFailurePolicy,

    #[serde(default)]
    store: StoreConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_trust_proxy() -> bool {
    true
}

fn default_static_dir() -> String {
    "public".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            trust_proxy: default_trust_proxy(),
            static_dir: default_static_dir(),
            stats_failure_policy: StatsFailurePolicy::default(),
            store: StoreConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Launch Tracker v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    info!(
        path = %config.store.path,
        trust_proxy = config.trust_proxy,
        stats_failure_policy = ?config.stats_failure_policy,
        static_dir = %config.static_dir,
        "Loaded configuration"
    );

    let sqlite = SqliteStore::open(config.store.clone()).context("Failed to open record store")?;

    if store::health::check_connection(&sqlite).await {
        health().store.set_healthy();
        info!("Record store connection: healthy");
    } else {
        health().store.set_unhealthy("Connection failed");
        error!("Record store connection: unhealthy");
    }

    let store: Arc<dyn RecordStore> = Arc::new(sqlite);

    let state = AppState::new(store.clone())
        .with_trust_proxy(config.trust_proxy)
        .with_stats_policy(config.stats_failure_policy)
        .with_static_dir(&config.static_dir);

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    health().server.set_healthy();
    info!("Server is running on http://{}", addr);

    // ConnectInfo supplies the peer address when proxy headers are not trusted
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Shutting down...");
    health().server.set_unhealthy("Shutting down");

    if let Err(e) = store.close().await {
        error!("Failed to close record store: {}", e);
    }

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables, e.g. TRACKER_STORE__PATH
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("TRACKER")
                .prefix_separator("_")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Plain PORT / DATABASE_URL as set by common hosting platforms
    if let Ok(port) = std::env::var("PORT") {
        config.port = port.trim().parse().context("Invalid PORT")?;
    }
    if let Ok(path) = std::env::var("DATABASE_URL") {
        config.store.path = path;
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
