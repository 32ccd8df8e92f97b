use thiserror::Error;

/// Errors raised inside the insight client.
///
/// Operations never hand these to their callers: [`crate::InsightClient::fetch`]
/// logs them and substitutes the operation's fallback. They are exposed through
/// [`crate::InsightClient::try_fetch`] for callers that want the typed cause.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Network, TLS, or body-read failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("generation API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The prompt was rejected before any candidate was produced.
    #[error("prompt blocked: {0}")]
    Blocked(String),

    /// The service returned no candidate text.
    #[error("empty response for {operation}")]
    EmptyResponse { operation: String },

    /// A body that should be JSON could not be parsed.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON that does not have the shape the operation declares.
    #[error("response validation failed for {context}: {reason}")]
    Validation { context: String, reason: String },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
