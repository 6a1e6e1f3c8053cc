// API client module: the transport every page operation goes through.
// `Transport` is the seam; `ApiClient` is the reqwest implementation
// that talks to the wiki's v2 REST API with Basic authentication.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method};
use std::time::Duration;

use crate::config::Settings;
use crate::error::NotesError;

/// Overall limit on a single request, connect to last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Path prefix of the page API on every wiki site.
pub const API_BASE_PATH: &str = "/wiki/api/v2";

/// A single request/response capability against the remote API.
///
/// `endpoint` is relative to the API base (`/pages?space-id=...`). On
/// success the raw response body is returned for the caller to decode.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, NotesError>;
}

/// Absolute URL for `endpoint` on `domain`.
pub fn endpoint_url(domain: &str, endpoint: &str) -> String {
    format!("https://{}{}{}", domain, API_BASE_PATH, endpoint)
}

/// Value of the Basic `Authorization` header: `base64(email:token)`.
pub fn basic_auth(email: &str, token: &str) -> String {
    STANDARD.encode(format!("{}:{}", email, token))
}

/// reqwest-backed transport. Cheap to clone and safe to share between
/// request handlers; it carries no per-call state.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl ApiClient {
    /// Client for `https://{domain}/wiki/api/v2` authenticated with the
    /// configured email and API token.
    pub fn new(settings: &Settings) -> Result<Self, NotesError> {
        Self::with_base_url(endpoint_url(&settings.domain, ""), settings)
    }

    /// Same as [`ApiClient::new`] but against an explicit base URL, e.g.
    /// a local mock server.
    pub fn with_base_url(base_url: impl Into<String>, settings: &Settings) -> Result<Self, NotesError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
            authorization: format!("Basic {}", basic_auth(&settings.email, &settings.api_token)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, NotesError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%method, %url, has_body = body.is_some(), "sending request");

        let mut req = self
            .client
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.authorization.as_str())
            .header(ACCEPT, "application/json");
        // `.json` also sets `Content-Type: application/json`.
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        // Drain the body in every case so the connection can be reused.
        let text = res.text().await?;
        if status.as_u16() >= 400 {
            tracing::warn!(%method, %url, status = status.as_u16(), "remote API error");
            return Err(NotesError::RemoteApi {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}
