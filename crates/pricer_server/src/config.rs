//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use pricer_models::registry::ModelSettings;
use pricer_models::analytical::DEFAULT_MAX_ITERATIONS;
use pricer_models::lattice::DEFAULT_STEPS;
use pricer_models::monte_carlo::DEFAULT_PATHS;
use pricer_risk::range::DEFAULT_MAX_GRID_POINTS;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: text, json")]
    InvalidLogFormat(String),

    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_parsed")]
    pub log_level: LogLevel,
    /// Log output format
    #[serde(deserialize_with = "deserialize_parsed")]
    pub log_format: LogFormat,
    /// Environment (development, staging, production)
    #[serde(deserialize_with = "deserialize_parsed")]
    pub environment: Environment,
    /// Range calculation worker threads (0 = host parallelism)
    pub worker_threads: usize,
    /// Binomial tree time steps
    pub binomial_steps: usize,
    /// Monte Carlo paths per simulation
    pub monte_carlo_paths: usize,
    /// Fixed Monte Carlo seed for reproducible results
    pub monte_carlo_seed: Option<u64>,
    /// Maximum grid points in one range calculation
    pub max_grid_points: usize,
    /// Log every grid-point valuation at debug level
    pub log_range_calculations: bool,
    /// Whether the Prometheus exporter is started
    pub metrics_enabled: bool,
    /// Port of the Prometheus scrape endpoint
    pub metrics_port: u16,
}

fn deserialize_parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            environment: Environment::Development,
            worker_threads: 0,
            binomial_steps: DEFAULT_STEPS,
            monte_carlo_paths: DEFAULT_PATHS,
            monte_carlo_seed: None,
            max_grid_points: DEFAULT_MAX_GRID_POINTS,
            log_range_calculations: false,
            metrics_enabled: false,
            metrics_port: 9100,
        }
    }
}

/// Parse an environment value, naming the variable on failure
fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} could not be parsed", name, value)))
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `PRICER_*` variables supplied by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PRICER_SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PRICER_SERVER_PORT") {
            self.port = parse_env("PRICER_SERVER_PORT", &port)?;
        }
        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(format) = lookup("PRICER_LOG_FORMAT") {
            self.log_format = LogFormat::from_str(&format)?;
        }
        if let Some(env) = lookup("PRICER_ENV") {
            self.environment = Environment::from_str(&env)?;
        }
        if let Some(threads) = lookup("PRICER_WORKER_THREADS") {
            self.worker_threads = parse_env("PRICER_WORKER_THREADS", &threads)?;
        }
        if let Some(steps) = lookup("PRICER_BINOMIAL_STEPS") {
            self.binomial_steps = parse_env("PRICER_BINOMIAL_STEPS", &steps)?;
        }
        if let Some(paths) = lookup("PRICER_MONTE_CARLO_PATHS") {
            self.monte_carlo_paths = parse_env("PRICER_MONTE_CARLO_PATHS", &paths)?;
        }
        if let Some(seed) = lookup("PRICER_MONTE_CARLO_SEED") {
            self.monte_carlo_seed = Some(parse_env("PRICER_MONTE_CARLO_SEED", &seed)?);
        }
        if let Some(max) = lookup("PRICER_MAX_GRID_POINTS") {
            self.max_grid_points = parse_env("PRICER_MAX_GRID_POINTS", &max)?;
        }
        if let Some(flag) = lookup("PRICER_LOG_RANGE_CALCULATIONS") {
            self.log_range_calculations = parse_env("PRICER_LOG_RANGE_CALCULATIONS", &flag)?;
        }
        if let Some(flag) = lookup("PRICER_METRICS_ENABLED") {
            self.metrics_enabled = parse_env("PRICER_METRICS_ENABLED", &flag)?;
        }
        if let Some(port) = lookup("PRICER_METRICS_PORT") {
            self.metrics_port = parse_env("PRICER_METRICS_PORT", &port)?;
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        if self.metrics_enabled && (self.metrics_port == 0 || self.metrics_port == self.port) {
            return Err(ConfigError::InvalidValue {
                field: "metrics_port",
                message: format!("{} must be non-zero and differ from port", self.metrics_port),
            });
        }
        if self.binomial_steps == 0 || i32::try_from(self.binomial_steps).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "binomial_steps",
                message: format!("{} is outside 1..={}", self.binomial_steps, i32::MAX),
            });
        }
        if self.monte_carlo_paths < 2 {
            return Err(ConfigError::InvalidValue {
                field: "monte_carlo_paths",
                message: format!("{} must be at least 2", self.monte_carlo_paths),
            });
        }
        if self.max_grid_points == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_grid_points",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Numerical settings for the pricing models
    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            binomial_steps: self.binomial_steps,
            monte_carlo_paths: self.monte_carlo_paths,
            monte_carlo_seed: self.monte_carlo_seed,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(log_format) = &cli.log_format {
            self.log_format = LogFormat::from_str(log_format)?;
        }
        if let Some(threads) = cli.worker_threads {
            self.worker_threads = threads;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Log format override
    pub log_format: Option<String>,
    /// Worker thread override
    pub worker_threads: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    build_config_with_env(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
