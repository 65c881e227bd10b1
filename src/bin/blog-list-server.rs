//! blog-list HTTP API server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use clap::Parser;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use blog_list::server::{AppState, Config, CorsConfig, init_logging, router};

/// blog-list HTTP API server.
#[derive(Parser, Debug)]
#[command(name = "blog-list-server")]
#[command(about = "HTTP API server for the blog list")]
struct Args {
    /// Path to the configuration file. Defaults apply when it does not exist.
    #[arg(short, long, default_value = "blog-list-server.toml")]
    config: PathBuf,

    /// Port to listen on, overriding the configuration file.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Blog store directory, overriding the configuration file.
    #[arg(long, env = "BLOG_LIST_DB_PATH")]
    db_path: Option<String>,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = if self.config.exists() {
            Config::from_file(&self.config)?
        } else {
            Config::default()
        };

        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = &self.db_path {
            config.database.path = path.clone();
        }
        Ok(config)
    }
}

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        return CorsLayer::new();
    }

    let mut cors = CorsLayer::new();
    let any_origin = config.allow_origins.iter().any(|o| o == "*");

    if any_origin {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .allow_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<_> = config
        .allow_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    let headers: Vec<_> = config
        .allow_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();

    cors = cors.allow_methods(methods).allow_headers(headers);

    if config.allow_credentials {
        if any_origin {
            tracing::warn!("Ignoring allow_credentials: not allowed with a \"*\" origin");
        } else {
            cors = cors.allow_credentials(true);
        }
    }

    cors.max_age(Duration::from_secs(config.max_age))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    init_logging(&config.logging)?;

    if !args.config.exists() {
        tracing::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    }

    tracing::info!("Opening blog store at {}", config.database.path);
    let state = AppState::from_config(&config)?;

    let mut app = router(state);

    if let Some(static_path) = &config.server.static_path {
        tracing::info!("Serving static files from: {}", static_path);
        app = app.fallback_service(ServeDir::new(static_path));
    }

    let cors = build_cors_layer(&config.cors);
    if config.cors.enabled {
        tracing::info!(
            "CORS enabled with {} allowed origin(s)",
            config.cors.allow_origins.len()
        );
    }

    let app: Router = app.layer(cors).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.bind_addr().parse()?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
