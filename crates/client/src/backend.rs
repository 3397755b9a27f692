//! HTTP access to the inventory backend.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use stockdesk_auth::Credential;

/// Path of the credential-exchange endpoint.
pub const TOKEN_PATH: &str = "/api/token/";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// The backend's credential exchange.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange a username/password for a token pair.
    async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Credential, BackendError>;
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
}

impl HttpBackend {
    /// `api_url` is the backend origin, e.g. `http://localhost:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Absolute URL for an API path (`/api/...`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Credential, BackendError> {
        let url = self.url(TOKEN_PATH);
        debug!(%url, username, "requesting token pair");

        let resp = self
            .client
            .post(&url)
            .json(&TokenRequest { username, password })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(BackendError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        resp.json::<Credential>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}
