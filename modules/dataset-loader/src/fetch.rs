use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} returned a body that is not valid UTF-8: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// No timeout unless set; a stalled server blocks the run.
    pub timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            timeout_ms: None,
            user_agent: format!("callcenter-setup/{}", callcenter_core::version()),
        }
    }
}

/// Plain GET client for the CSV datasets. No retries.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(opts: &FetchOptions) -> Result<Self, LoadError> {
        let mut builder = Client::builder()
            .user_agent(opts.user_agent.clone())
            .brotli(true)
            .gzip(true)
            .deflate(true);
        if let Some(ms) = opts.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Fetcher { client: builder.build().map_err(LoadError::Client)? })
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Request { url: url.to_string(), source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status { url: url.to_string(), status: status.as_u16() });
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|source| LoadError::Request { url: url.to_string(), source })?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|source| LoadError::Decode { url: url.to_string(), source })?;
        tracing::debug!(url, bytes = text.len(), "fetched dataset");
        Ok(text)
    }
}
