use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;
use tracing::debug;

use crate::models::{decode_body, ApiResponse};

/// Authenticated HTTP exchange with the Boosta API.
///
/// Every call yields an [`ApiResponse`]: HTTP error statuses are returned as
/// they came, and failures that prevent a response (connection refused, DNS,
/// timeouts, unreadable body) become status `0` with a `network_error`
/// message. Nothing is retried here.
#[derive(Debug, Clone)]
pub struct Transport {
    base_url: String,
    base: Url,
    authorization: HeaderValue,
    http: reqwest::Client,
}

impl Transport {
    /// `base` must be able to carry a path (see [`Url::cannot_be_a_base`]).
    pub(crate) fn new(
        base_url: String,
        base: Url,
        authorization: HeaderValue,
        http: reqwest::Client,
    ) -> Self {
        Self {
            base_url,
            base,
            authorization,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET` without a body.
    pub async fn get(&self, path: &[&str]) -> ApiResponse {
        self.request::<()>(Method::GET, path, None).await
    }

    /// Send `body`, when present, as JSON.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<&B>,
    ) -> ApiResponse {
        let url = self.endpoint(path);
        debug!(%method, %url, "sending request");

        let mut req = self
            .http
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, self.authorization.clone());

        if let Some(b) = body {
            req = req.header(CONTENT_TYPE, "application/json").json(b);
        }

        let response = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(%method, %url, error = %e, "request failed before a response");
                return ApiResponse::network_error(e);
            }
        };

        let status_code = response.status().as_u16();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => {
                debug!(%method, %url, status_code, error = %e, "failed to read response body");
                return ApiResponse::network_error(e);
            }
        };

        debug!(%method, %url, status_code, bytes = text.len(), "received response");
        ApiResponse::new(status_code, decode_body(&text))
    }
}
