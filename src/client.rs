use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::Method;

use crate::errors::{BoostaError, Result};
use crate::models::{ApiResponse, SubmitJob, VideoType};
use crate::poller::JobStatusSource;
use crate::transport::Transport;

pub const DEFAULT_BASE_URL: &str = "https://boosta.pro/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const API_KEY_ENV: &str = "BOOSTA_API_KEY";

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use boosta::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> boosta::Result<()> {
/// let client = ClientBuilder::new()
///     .api_key("bst_live_abc123")
///     .base_url("http://localhost:8080/api/v1")
///     .timeout(Duration::from_secs(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the bearer token used on every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the base URL (defaults to `https://boosta.pro/api/v1`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request HTTP timeout (defaults to 60 seconds).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = d;
        self
    }

    /// Build the [`Client`].
    ///
    /// If no API key was set via [`api_key`](Self::api_key), the builder reads
    /// the `BOOSTA_API_KEY` environment variable. An empty key counts as
    /// missing and yields [`BoostaError::MissingApiKey`].
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or(BoostaError::MissingApiKey)?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| BoostaError::InvalidApiKey {
                message: e.to_string(),
            })?;
        authorization.set_sensitive(true);

        let base_url = self.base_url.trim_end_matches('/').to_string();
        let base = reqwest::Url::parse(&base_url).map_err(|e| BoostaError::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(BoostaError::InvalidBaseUrl {
                url: base_url,
                message: "URL cannot carry a path".into(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(BoostaError::Http)?;

        Ok(Client {
            transport: Transport::new(base_url, base, authorization, http),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Boosta API client.
///
/// Each operation is one request; the outcome, error statuses included, comes
/// back as an [`ApiResponse`].
#[derive(Debug, Clone)]
pub struct Client {
    transport: Transport,
}

impl Client {
    /// Build a client with default settings and the given key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// `POST /jobs`. `config_name` is left out of the body when absent.
    pub async fn submit_job(
        &self,
        video_url: &str,
        video_type: VideoType,
        config_name: Option<&str>,
    ) -> ApiResponse {
        let body = SubmitJob::new(video_url, video_type, config_name.map(str::to_string));
        self.transport
            .request(Method::POST, &["jobs"], Some(&body))
            .await
    }

    /// `GET /jobs/{job_id}`. The id is sent as a single encoded path segment.
    pub async fn get_job(&self, job_id: &str) -> ApiResponse {
        self.transport.get(&["jobs", job_id]).await
    }

    /// `GET /jobs`.
    pub async fn list_jobs(&self) -> ApiResponse {
        self.transport.get(&["jobs"]).await
    }

    /// `GET /usage`: account usage and remaining credits.
    pub async fn get_usage(&self) -> ApiResponse {
        self.transport.get(&["usage"]).await
    }
}

#[async_trait]
impl JobStatusSource for Client {
    async fn get_job(&self, job_id: &str) -> ApiResponse {
        Client::get_job(self, job_id).await
    }
}
