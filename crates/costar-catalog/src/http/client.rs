//! Blocking HTTP client with retry, exponential backoff, timeout, and gzip.

use std::time::Duration;

use tracing::{debug, warn};

use costar_core::config::CatalogConfig;
use costar_core::errors::CatalogError;

const MAX_BACKOFF: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Doubles on every retry, up to `max_backoff`.
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl HttpClientConfig {
    pub fn from_catalog(config: &CatalogConfig) -> Self {
        Self {
            user_agent: config.effective_user_agent(),
            timeout: config.request_timeout(),
            max_retries: config.effective_max_retries(),
            initial_backoff: config.initial_backoff(),
            max_backoff: MAX_BACKOFF,
        }
    }
}

/// Page fetcher for the web catalog. Network errors and 5xx/429 responses are
/// retried; other 4xx responses fail at once.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Network {
                url: String::new(),
                reason: format!("client setup failed: {e}"),
            })?;
        Ok(Self { client, config })
    }

    /// GET `url` and return the body as text.
    pub fn get_text(&self, url: &str) -> Result<String, CatalogError> {
        let mut backoff = self.config.initial_backoff;
        let mut attempt = 0;
        loop {
            match self.get_once(url) {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    debug!(
                        url,
                        attempt,
                        max_retries = self.config.max_retries,
                        ?backoff,
                        error = %e,
                        "retrying catalog request"
                    );
                    std::thread::sleep(backoff);
                    backoff = (backoff * 2).min(self.config.max_backoff);
                }
                Err(e) => {
                    if attempt > 0 {
                        warn!(url, attempts = attempt + 1, error = %e, "catalog request gave up");
                    }
                    return Err(e);
                }
            }
        }
    }

    fn get_once(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.client.get(url).send().map_err(|e| CatalogError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(|e| CatalogError::Network {
            url: url.to_string(),
            reason: format!("reading body failed: {e}"),
        })
    }
}
