//! HTTP transport for the API: authentication, request dispatch and the
//! service error envelope.

use std::time::Duration;

use reqwest::header;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Production API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.mackerelio.com";

/// Header carrying the organization API key.
const API_KEY_HEADER: &str = "X-Api-Key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Mackerel REST API.
///
/// Holds the endpoint, the API key and a reused [`reqwest::Client`].
/// Every operation is one request/response round trip; there is no retry
/// or caching layer, and the client is safe to share across tasks.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    api_key: String,
    http: reqwest::Client,
    user_agent: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Client {
    /// Creates a client against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the underlying HTTP client cannot
    /// be built.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom endpoint, e.g. a test server or
    /// an on-premise proxy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            http,
            user_agent: format!("mackerel-client-rs/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    /// Single round trip: send, read the body as text, then decode. Reading
    /// text first keeps decode failures distinct from transport failures.
    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        tracing::debug!(method = %method, path, "dispatching API request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(header::USER_AGENT, &self.user_agent);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text);
            tracing::warn!(
                method = %method,
                path,
                status = status.as_u16(),
                %message,
                "API request failed"
            );
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Error payload of a non-2xx response. The current API wraps the message
/// in an object (`{"error": {"message": ...}}`); some older endpoints
/// return the bare-string form (`{"error": "..."}`).
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Detailed { message: String },
    Bare(String),
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error {
            ErrorPayload::Detailed { message } => message,
            ErrorPayload::Bare(message) => message,
        },
        Err(_) => body.trim().to_string(),
    }
}
