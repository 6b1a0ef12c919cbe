// src/fetch/mod.rs

use reqwest::blocking::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::error::FetchError;

pub mod tables;

pub use tables::parse_tables;

/// Anything that can hand back the raw markup behind a URL.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Blocking HTTP GET; a non-2xx status is an error. No retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        // the blocking client defaults to a 30s timeout; `None` clears it
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(url = %url))]
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        debug!("Fetching text from {}", url);
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        resp.text().map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }
}
