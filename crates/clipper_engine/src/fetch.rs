//! Scrap API client.

use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use clipper_core::{Scrap, ScrapResponse};

const DEFAULT_API_BASE: &str = "https://zenn.dev/api";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Base URL of the scrap API, without a trailing slash. Overridable so
    /// tests can point the client at a local server.
    pub api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchScrapError {
    #[error("scrap not found")]
    NotFound,
    #[error("scrap is private")]
    Private,
    #[error("http status {0}")]
    Status(u16),
    #[error("api reported failure: {0}")]
    Api(String),
    #[error("malformed scrap payload: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

/// Error body the API returns for some failures, with a success status.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ScrapClient {
    settings: FetchSettings,
}

impl ScrapClient {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// Fetches one scrap by slug and validates the payload shape.
    pub async fn fetch_scrap(&self, slug: &str) -> Result<Scrap, FetchScrapError> {
        let url = format!("{}/scraps/{}", self.settings.api_base, slug);
        info!("fetching scrap {slug}");

        let client = self.build_client()?;
        let response = client.get(&url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        match status.as_u16() {
            404 => return Err(FetchScrapError::NotFound),
            403 => return Err(FetchScrapError::Private),
            code if !status.is_success() => return Err(FetchScrapError::Status(code)),
            _ => {}
        }

        let body = response.text().await.map_err(map_reqwest_error)?;

        // the error-body shape is checked first: some failures come back
        // with a success status and only a message field
        if let Ok(error_body) = serde_json::from_str::<ApiErrorBody>(&body) {
            return Err(FetchScrapError::Api(error_body.message));
        }

        let envelope: ScrapResponse = serde_json::from_str(&body)?;
        debug!(
            "scrap {slug}: {} top-level comments",
            envelope.scrap.comments.len()
        );
        Ok(envelope.scrap)
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchScrapError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchScrapError::Network(err.to_string()))
    }
}

/// Runs [`ScrapClient::fetch_scrap`] on a private current-thread runtime,
/// for callers that are not themselves async.
pub fn fetch_scrap_blocking(
    settings: FetchSettings,
    slug: &str,
) -> Result<Scrap, FetchScrapError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| FetchScrapError::Network(err.to_string()))?;
    runtime.block_on(ScrapClient::new(settings).fetch_scrap(slug))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchScrapError {
    if err.is_timeout() {
        return FetchScrapError::Timeout;
    }
    FetchScrapError::Network(err.to_string())
}
