//! Option Pricing Server
//!
//! REST API server for option valuations and range calculations.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use pricer_server::config::{build_config, CliArgs as ConfigCliArgs, LogFormat, ServerConfig};
use pricer_server::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Option Pricing Server - REST API for option valuations
#[derive(Parser, Debug)]
#[command(name = "pricer_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "PRICER_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PRICER_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PRICER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, env = "PRICER_LOG_FORMAT")]
    log_format: Option<String>,

    /// Range calculation worker threads (0 = host parallelism)
    #[arg(short, long, env = "PRICER_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            log_format: args.log_format,
            worker_threads: args.worker_threads,
        }
    }
}

fn init_tracing(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level.as_filter_str()));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn init_metrics(config: &ServerConfig) -> anyhow::Result<()> {
    if !config.metrics_enabled {
        return Ok(());
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.metrics_port)
        .parse()
        .with_context(|| format!("invalid metrics address {}:{}", config.host, config.metrics_port))?;
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("failed to start Prometheus exporter")?;

    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args).context("failed to load configuration")?;

    init_tracing(&config);

    tracing::info!("Option Pricing Server v{}", pricer_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        log_format = %config.log_format,
        environment = %config.environment,
        worker_threads = config.worker_threads,
        max_grid_points = config.max_grid_points,
        metrics_enabled = config.metrics_enabled,
        "Server configuration loaded"
    );

    init_metrics(&config)?;

    let server = Server::new(config).context("failed to initialise server")?;
    tracing::info!(address = %server.socket_addr()?, "Starting server");

    server.run().await?;

    Ok(())
}
