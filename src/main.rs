//! json-mock server.
//!
//! Serves JSON files from a directory tree so a frontend can be developed
//! against static responses instead of a live backend.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ trace / request id / timeout
//!                         │
//!                         ▼
//!                   mock middleware ──miss──▶ 404 fallback
//!                         │ hit
//!                         ▼
//!                   Resolver: walk dirs → score candidates → read + parse
//!                         │
//!     ◀───────────────────┘ 200 application/json
//! ```

use std::path::PathBuf;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use json_mock::config::validation::validate_config;
use json_mock::config::watcher::ConfigWatcher;
use json_mock::config::{load_config, ConfigError, MockConfig};
use json_mock::observability::{logging, metrics};
use json_mock::{HttpServer, Shutdown};

#[derive(Parser, Debug, Clone)]
#[command(name = "json-mock")]
#[command(about = "Serve file-backed JSON mock responses", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mock root directory (overrides the config file).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Bind address (overrides the config file).
    #[arg(short, long)]
    bind: Option<String>,
}

impl Cli {
    fn apply(&self, config: &mut MockConfig) {
        if let Some(root) = &self.root {
            config.resolver.root = root.clone();
        }
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MockConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_tracing(&config.observability);
    tracing::info!(
        bind_address = %config.listener.bind_address,
        root = %config.resolver.root.display(),
        mount_prefix = %config.resolver.mount_prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // File changes are re-applied with the same command-line overrides.
    let (updates_tx, config_updates) = mpsc::unbounded_channel();
    let _watcher = match (&cli.config, config.reload.watch_config) {
        (Some(path), true) => {
            let (watcher, mut raw_updates) = ConfigWatcher::new(path);
            let guard = watcher.run()?;
            let cli = cli.clone();
            tokio::spawn(async move {
                while let Some(mut new_config) = raw_updates.recv().await {
                    cli.apply(&mut new_config);
                    if let Err(errors) = validate_config(&new_config) {
                        tracing::error!(
                            error = %ConfigError::Validation(errors),
                            "Reloaded config rejected"
                        );
                        continue;
                    }
                    if updates_tx.send(new_config).is_err() {
                        break;
                    }
                }
            });
            Some(guard)
        }
        _ => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
