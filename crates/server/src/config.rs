//! Startup configuration from flags and the environment.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cleanslate_api::{ClientConfig, TransportKind};
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    Graphql,
    Rest,
}

impl From<Transport> for TransportKind {
    fn from(transport: Transport) -> Self {
        match transport {
            Transport::Graphql => TransportKind::Graphql,
            Transport::Rest => TransportKind::Rest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// MCP server exposing the CleanSlate food log as tools.
#[derive(Debug, Parser)]
#[command(name = "cleanslate-mcp", version)]
pub struct Config {
    /// CleanSlate API key
    #[arg(long, env = "CLEANSLATE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Service endpoint; defaults to the transport's public URL
    #[arg(long, env = "CLEANSLATE_API_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "CLEANSLATE_TRANSPORT", value_enum, default_value_t = Transport::Graphql)]
    pub transport: Transport,

    /// Deadline for one request, retries included
    #[arg(
        long,
        env = "REQUEST_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Retries after a connection failure
    #[arg(
        long,
        env = "MAX_RETRIES",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(0..=3)
    )]
    pub max_retries: u32,

    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn transport_kind(&self) -> TransportKind {
        self.transport.into()
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.transport_kind().default_base_url())
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self.api_key.clone().unwrap_or_default();
        let config = ClientConfig::new(api_key, self.base_url())
            .context("Invalid CleanSlate client configuration")?
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_max_retries(self.max_retries);
        Ok(config)
    }
}
