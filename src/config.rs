//! Runtime configuration for the aggregation service

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::data::similar::DEFAULT_SIMILAR_FILE;
use crate::data::wger::{default_user_agent, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT, WGER_BASE_URL};

/// Default cache time-to-live
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default number of exercises requested per upstream query
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size the upstream accepts
pub const MAX_LIMIT: u32 = 100;

/// Default listen address for `serve`
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Settings consumed by the service and its upstream client
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Upstream API root
    pub base_url: String,
    /// Upstream language id
    pub language: u32,
    /// Outbound `User-Agent` header
    pub user_agent: String,
    /// Path of the similar-muscles JSON file
    pub similar_file: PathBuf,
    /// How long an aggregated result stays fresh
    pub cache_ttl: Duration,
    /// Limit used when the requested one is missing or out of range
    pub default_limit: u32,
    /// Largest accepted limit
    pub max_limit: u32,
    /// Bound on each upstream call
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: WGER_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE,
            user_agent: default_user_agent(),
            similar_file: PathBuf::from(DEFAULT_SIMILAR_FILE),
            cache_ttl: DEFAULT_CACHE_TTL,
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Maps a requested limit onto the effective one
    ///
    /// Values in `1..=max_limit` are kept; anything else, including a missing
    /// value, becomes `default_limit`.
    pub fn normalize_limit(&self, requested: Option<i64>) -> u32 {
        match requested {
            Some(n) if (1..=i64::from(self.max_limit)).contains(&n) => n as u32,
            _ => self.default_limit,
        }
    }
}

/// Settings for the HTTP surface
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}
