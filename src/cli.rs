//! Command-line interface parsing for fitagg
//!
//! This module handles parsing of CLI arguments using clap. Global options
//! configure the upstream client and cache; subcommands choose between
//! running the HTTP server and a one-off lookup.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::config::{Config, ServerConfig, DEFAULT_ADDR};

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// Limits must satisfy 1 <= default <= max
    #[error("Invalid limits: default {default} must be between 1 and max {max}")]
    InvalidLimits { default: u32, max: u32 },

    /// Base URL is empty
    #[error("Invalid base URL: must not be empty")]
    EmptyBaseUrl,
}

/// fitagg - exercise lookup by muscle group, cached over the wger API
#[derive(Parser, Debug)]
#[command(name = "fitagg")]
#[command(about = "Aggregate wger exercises by muscle group with caching")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub upstream: UpstreamArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct UpstreamArgs {
    /// Root of the upstream exercise API
    #[arg(long, env = "WGER_BASE_URL", default_value = crate::data::wger::WGER_BASE_URL, global = true)]
    pub base_url: String,

    /// Upstream language id
    #[arg(long, env = "WGER_LANGUAGE", default_value_t = crate::data::wger::DEFAULT_LANGUAGE, global = true)]
    pub language: u32,

    /// User-Agent header for upstream calls
    #[arg(long, env = "WGER_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    /// JSON file mapping muscle names to similar muscle names
    #[arg(long, env = "SIMILAR_MUSCLES_FILE", default_value = crate::data::similar::DEFAULT_SIMILAR_FILE, global = true)]
    pub similar_file: PathBuf,

    /// Seconds an aggregated result stays cached
    #[arg(long, env = "CACHE_TTL_SECS", default_value_t = 300, global = true)]
    pub cache_ttl_secs: u64,

    /// Limit used when none or an out-of-range one is requested
    #[arg(long, default_value_t = crate::config::DEFAULT_LIMIT, global = true)]
    pub default_limit: u32,

    /// Largest accepted limit
    #[arg(long, default_value_t = crate::config::MAX_LIMIT, global = true)]
    pub max_limit: u32,

    /// Seconds before an upstream call is abandoned
    #[arg(long, env = "WGER_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "FITAGG_ADDR", default_value = DEFAULT_ADDR)]
        addr: SocketAddr,
    },

    /// Look up exercises for one muscle group and print them as JSON
    ///
    /// Examples:
    ///   fitagg exercises chest
    ///   fitagg exercises "lower back" --limit 10
    ///   fitagg exercises 4,5
    Exercises {
        /// Muscle-group name or comma-separated upstream muscle ids
        muscle: String,

        /// Number of exercises requested per upstream query (1-100)
        #[arg(long)]
        limit: Option<i64>,
    },

    /// List supported muscle-group names
    Muscles,
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with settings from flags, environment and defaults
    /// * `Err(CliError)` if the limits or base URL are unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let args = &cli.upstream;

        if args.default_limit == 0 || args.default_limit > args.max_limit {
            return Err(CliError::InvalidLimits {
                default: args.default_limit,
                max: args.max_limit,
            });
        }
        if args.base_url.trim().is_empty() {
            return Err(CliError::EmptyBaseUrl);
        }

        let defaults = Config::default();
        Ok(Config {
            base_url: args.base_url.trim().trim_end_matches('/').to_string(),
            language: args.language,
            user_agent: args.user_agent.clone().unwrap_or(defaults.user_agent),
            similar_file: args.similar_file.clone(),
            cache_ttl: Duration::from_secs(args.cache_ttl_secs),
            default_limit: args.default_limit,
            max_limit: args.max_limit,
            request_timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

impl ServerConfig {
    /// Extracts server settings; `None` unless the command is `serve`
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        match &cli.command {
            Command::Serve { addr } => Some(ServerConfig { addr: *addr }),
            _ => None,
        }
    }
}
