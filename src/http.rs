// src/http.rs
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, InvalidHeaderValue, USER_AGENT};
use thiserror::Error;
use tracing::debug;

use crate::config::HttpSettings;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect timeout for {url}")]
    ConnectTimeout { url: String },
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid user agent {agent:?}: {source}")]
    UserAgent {
        agent: String,
        #[source]
        source: InvalidHeaderValue,
    },
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// The single network operation the engine needs: GET a URL and hand back its body.
///
/// Calls are awaited one at a time, so implementations never see overlapping requests.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get_text(&self, url: &str) -> Result<String, TransportError>;
}

/// `Transport` over a shared `reqwest::Client` with browser-like default headers.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, ClientError> {
        let agent = settings
            .user_agent
            .parse::<HeaderValue>()
            .map_err(|source| ClientError::UserAgent {
                agent: settings.user_agent.clone(),
                source,
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpClient {
    async fn get_text(&self, url: &str) -> Result<String, TransportError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await.map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify(url, e))
    }
}

fn classify(url: &str, source: reqwest::Error) -> TransportError {
    // reqwest flags a connect-phase timeout as both `is_connect` and `is_timeout`.
    if source.is_connect() && source.is_timeout() {
        TransportError::ConnectTimeout { url: url.to_string() }
    } else {
        TransportError::Request {
            url: url.to_string(),
            source,
        }
    }
}
