//! "Advice of the day" client
//!
//! Fetches a random advice slip from the Advice Slip API. Failures never
//! propagate; callers always get a string back.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default URL of the Advice Slip API
pub const ADVICE_SLIP_URL: &str = "https://api.adviceslip.com/advice";

/// Returned when the advice service cannot be reached or parsed
pub const NO_ADVICE: &str = "no advice for today";

#[derive(Debug, Deserialize)]
struct AdviceResponse {
    slip: AdviceSlip,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct AdviceSlip {
    id: u32,
    advice: String,
}

/// Client for the Advice Slip API
#[derive(Debug, Clone)]
pub struct AdviceSlipClient {
    client: Client,
    url: String,
}

impl AdviceSlipClient {
    /// Creates a client for `url` with a 10 second timeout
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetches one advice string, or [`NO_ADVICE`] on any failure
    pub async fn fetch_advice(&self) -> String {
        match self.try_fetch().await {
            Ok(advice) => advice,
            Err(e) => {
                debug!(error = %e, "advice slip unavailable");
                NO_ADVICE.to_string()
            }
        }
    }

    async fn try_fetch(&self) -> Result<String, reqwest::Error> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        // The API answers with text/html content type, so decode the body ourselves
        let text = response.text().await?;
        match serde_json::from_str::<AdviceResponse>(&text) {
            Ok(parsed) => Ok(parsed.slip.advice),
            Err(e) => {
                debug!(error = %e, "advice slip body not understood");
                Ok(NO_ADVICE.to_string())
            }
        }
    }
}
