//! Listing page fetch.

use std::path::Path;
use std::time::Duration;

use soupcal_core::{SoupCalError, SoupCalResult};
use tracing::debug;

use crate::config::Settings;

/// HTTP client for the listing page.
///
/// Network errors, timeouts and non-2xx responses all surface as
/// `SoupCalError::Fetch`; there are no retries here.
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    url: String,
}

impl PageFetcher {
    pub fn new(url: impl Into<String>, user_agent: &str, timeout: Duration) -> SoupCalResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| SoupCalError::Fetch(format!("Could not build HTTP client: {e}")))?;

        Ok(PageFetcher {
            client,
            url: url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> SoupCalResult<Self> {
        Self::new(
            settings.scrape_url.clone(),
            &settings.user_agent,
            settings.request_timeout(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> SoupCalResult<String> {
        debug!(url = %self.url, "fetching listing page");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SoupCalError::Fetch(format!("{}: {e}", self.url)))?;

        response
            .text()
            .await
            .map_err(|e| SoupCalError::Fetch(format!("{}: {e}", self.url)))
    }
}

/// Page markup from a local file if given, otherwise from the network.
pub async fn load_markup(file: Option<&Path>, settings: &Settings) -> SoupCalResult<String> {
    match file {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => PageFetcher::from_settings(settings)?.fetch().await,
    }
}
