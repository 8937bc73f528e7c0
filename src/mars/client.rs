use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use super::error::FetchError;
use super::photo::PhotoRecord;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Network accessor for the photo list endpoint.
///
/// Object-safe so the view model can hold an `Arc<dyn FetchClient>` and
/// tests can substitute a stub.
#[async_trait]
pub trait FetchClient: Send + Sync {
    async fn get_photos(&self) -> Result<Vec<PhotoRecord>, FetchError>;
}

/// `FetchClient` backed by a single GET to `{base_url}/photos`.
#[derive(Debug, Clone)]
pub struct HttpFetchClient {
    client: Client,
    photos_url: String,
}

impl HttpFetchClient {
    /// Build a client for `base_url`. Without a timeout the transport
    /// default applies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            photos_url: format!("{}/photos", base_url.trim_end_matches('/')),
        })
    }

    pub fn photos_url(&self) -> &str {
        &self.photos_url
    }
}

#[async_trait]
impl FetchClient for HttpFetchClient {
    async fn get_photos(&self) -> Result<Vec<PhotoRecord>, FetchError> {
        tracing::debug!(url = %self.photos_url, "Calling photos API");
        let resp = self.client.get(&self.photos_url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = resp.bytes().await?;
        let photos: Vec<PhotoRecord> = serde_json::from_slice(&body)?;
        tracing::debug!(count = photos.len(), "Received photos");
        Ok(photos)
    }
}
