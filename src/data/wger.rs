//! wger exercise API client
//!
//! Issues filtered queries against the upstream `/exercise/` listing, once
//! per muscle filter, and returns the raw exercise records of the first page.

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::Exercise;

/// Default base URL for the wger API
pub const WGER_BASE_URL: &str = "https://wger.de/api/v2";

/// Default language id (English)
pub const DEFAULT_LANGUAGE: u32 = 2;

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching exercises
#[derive(Debug, Error)]
pub enum WgerError {
    /// Upstream answered with a non-2xx status
    #[error("wger returned {0}")]
    Status(u16),

    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Base URL could not be combined with the exercise path
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    /// Called with an empty identifier list
    #[error("no muscles provided")]
    NoMuscles,

    /// HTTP client could not be configured (e.g. an invalid User-Agent)
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Which muscle attribution the query filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuscleFilter {
    /// Exercises that target the muscle as a main target
    Primary,
    /// Exercises where the muscle assists
    Secondary,
}

impl MuscleFilter {
    /// Query parameter name understood by the upstream endpoint
    pub fn param(&self) -> &'static str {
        match self {
            MuscleFilter::Primary => "muscles",
            MuscleFilter::Secondary => "muscles_secondary",
        }
    }
}

impl fmt::Display for MuscleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Paged envelope returned by the exercise listing
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct PagedResponse {
    count: u32,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<Exercise>,
}

/// Client for the upstream exercise listing
///
/// Stateless apart from its connection pool; clone it freely.
#[derive(Debug, Clone)]
pub struct WgerClient {
    client: Client,
    base_url: String,
    language: u32,
}

/// User agent sent when none is configured
pub fn default_user_agent() -> String {
    format!("fitagg/{}", env!("CARGO_PKG_VERSION"))
}

impl WgerClient {
    /// Create a new WgerClient
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. `https://wger.de/api/v2`; a trailing `/` is ignored
    /// * `language` - Upstream language id
    /// * `user_agent` - Outbound `User-Agent` header
    /// * `timeout` - Bound on each upstream call
    ///
    /// # Returns
    /// * `Err(WgerError::ClientBuild)` - If the HTTP client rejects the settings,
    ///   for instance a User-Agent that is not a valid header value
    pub fn new(
        base_url: impl Into<String>,
        language: u32,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WgerError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.into())
            .build()
            .map_err(WgerError::ClientBuild)?;
        Ok(Self::with_client(client, base_url, language))
    }

    /// Create a new WgerClient with a custom HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>, language: u32) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language,
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the listing URL for one filtered query
    fn exercise_url(&self, filter: MuscleFilter, ids: &[u32], limit: u32) -> Result<Url, WgerError> {
        let mut url = Url::parse(&format!("{}/exercise/", self.base_url))
            .map_err(|e| WgerError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        url.query_pairs_mut()
            .append_pair("language", &self.language.to_string())
            .append_pair("limit", &limit.to_string())
            .append_pair(filter.param(), &ids_to_csv(ids));

        Ok(url)
    }

    /// Fetch one page of exercises filtered on `ids`
    ///
    /// # Arguments
    /// * `filter` - Primary or secondary muscle filter
    /// * `ids` - Upstream muscle identifiers
    /// * `limit` - Page size, already normalized by the caller
    ///
    /// # Returns
    /// * `Ok(Vec<Exercise>)` - The `results` of the page
    /// * `Err(WgerError)` - Non-2xx status, transport failure or malformed body
    pub async fn fetch(
        &self,
        filter: MuscleFilter,
        ids: &[u32],
        limit: u32,
    ) -> Result<Vec<Exercise>, WgerError> {
        if ids.is_empty() {
            return Err(WgerError::NoMuscles);
        }

        let url = self.exercise_url(filter, ids, limit)?;
        debug!(%url, %filter, "querying upstream");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let text = response.text().await?;
        let page: PagedResponse = serde_json::from_str(&text)?;
        debug!(%filter, count = page.count, returned = page.results.len(), "upstream page received");

        Ok(page.results)
    }

    /// Fetch both the primary and the secondary page for `ids`
    ///
    /// Both calls run concurrently; the first failure cancels the other and
    /// is returned. No partial result is produced.
    pub async fn fetch_both(
        &self,
        ids: &[u32],
        limit: u32,
    ) -> Result<(Vec<Exercise>, Vec<Exercise>), WgerError> {
        futures::try_join!(
            self.fetch(MuscleFilter::Primary, ids, limit),
            self.fetch(MuscleFilter::Secondary, ids, limit),
        )
    }
}

fn status_error(status: StatusCode) -> WgerError {
    WgerError::Status(status.as_u16())
}

/// Joins identifiers as `"12,13,14"`
fn ids_to_csv(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
