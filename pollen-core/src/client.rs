use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use thiserror::Error;
use tracing::debug;

use crate::model::PollenForecast;

/// Forecast API endpoint; the location code is appended as the final path
/// segment.
pub const API_BASE: &str = "https://www.pollen.com/api/forecast/current/pollen";

/// Public forecast pages, used for the `Referer` header and reply links.
pub const WEB_BASE: &str = "https://www.pollen.com/forecast/current/pollen";

/// The API rejects requests without a browser `User-Agent`.
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:75.0) Gecko/20100101 Firefox/75.0";

/// Per-request deadline. Deliberately tight: a forecast is best-effort, and a
/// slow upstream should fail fast rather than stall the dispatcher.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(200);

/// Public site URL for a location's forecast page.
pub fn web_link(zip: &str) -> String {
    format!("{WEB_BASE}/{zip}")
}

/// Classified failure of a forecast fetch. Terminal for the invocation;
/// there are no retries.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, connect, timeout, body read) before a
    /// usable HTTP response was obtained.
    #[error("{0}")]
    Transport(String),

    /// The server answered with something other than 200.
    #[error("Server responded with HTTP {0}")]
    HttpStatus(u16),

    /// Status 200, but the body was not valid JSON.
    #[error("Error parsing JSON response: {0}")]
    MalformedBody(String),
}

/// Endpoints and deadline for a [`PollenComClient`]. Defaults point at the
/// live service; tests swap `api_base` for a local mock.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub web_base: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            web_base: WEB_BASE.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Upstream source of pollen forecasts.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn fetch_forecast(&self, zip: &str) -> Result<PollenForecast, FetchError>;
}

/// HTTP client for the Pollen.com forecast API.
#[derive(Debug, Clone)]
pub struct PollenComClient {
    http: Client,
    config: ClientConfig,
}

impl PollenComClient {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

impl Default for PollenComClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastFetcher for PollenComClient {
    async fn fetch_forecast(&self, zip: &str) -> Result<PollenForecast, FetchError> {
        debug!(%zip, "requesting pollen forecast");

        let url = format!("{}/{}", self.config.api_base, zip);
        let referer = format!("{}/{}", self.config.web_base, zip);

        let res = self
            .http
            .get(&url)
            .timeout(self.config.timeout)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::REFERER, referer)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = res
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let forecast: PollenForecast =
            serde_json::from_str(&body).map_err(|err| FetchError::MalformedBody(err.to_string()))?;
        debug!(forecast = ?forecast, "parsed pollen forecast");

        Ok(forecast)
    }
}
