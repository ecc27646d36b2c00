/// Errors returned by API client operations.
///
/// Transport failures, API-level rejections and response decode failures
/// are kept distinct so callers can tell a flaky network apart from a
/// request the service actually refused.
///
/// # Examples
///
/// ```rust
/// use mackerel_client::error::Error;
///
/// let err = Error::Api { status: 404, message: "channel not found".to_string() };
/// assert!(err.to_string().contains("404"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network or HTTP-layer failure from the underlying transport.
    #[error("mackerel: transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("mackerel: API error: status={status}, message={message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON, or a required field had the wrong type.
    #[error("mackerel: decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base URL given at client construction could not be parsed.
    #[error("mackerel: invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Convenience `Result` alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
