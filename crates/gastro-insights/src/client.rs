//! HTTP client for the generative-AI `generateContent` endpoint.
//!
//! One [`InsightClient`] is built at start-up from the process configuration
//! and passed by reference to whoever needs insights. Every operation issues
//! exactly one request: no retry, no caching. The service is non-deterministic,
//! so two calls with identical input may return different text.

use std::time::Duration;

use gastro_core::config::{
    DEFAULT_FAST_MODEL, DEFAULT_GENAI_BASE_URL, DEFAULT_PRO_MODEL, DEFAULT_USER_AGENT,
};
use gastro_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::InsightError;
use crate::operations::{ExecutiveReportRequest, FeedbackSentiment, SmartInsights};
use crate::policy::{InsightRequest, ModelTier};
use crate::schema::Schema;
use crate::state::Outcome;
use crate::types::{ExecutiveReport, FeedbackAnalysis, InsightItem};
use crate::wire::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`InsightClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub fast_model: String,
    pub pro_model: String,
    /// Total request timeout. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GENAI_BASE_URL.to_string(),
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            pro_model: DEFAULT_PRO_MODEL.to_string(),
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.genai_base_url.clone(),
            fast_model: config.fast_model.clone(),
            pro_model: config.pro_model.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Client for schema-constrained JSON generation.
pub struct InsightClient {
    client: Client,
    api_key: String,
    base_url: Url,
    fast_model: String,
    pro_model: String,
}

impl std::fmt::Debug for InsightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightClient")
            .field("base_url", &self.base_url.as_str())
            .field("fast_model", &self.fast_model)
            .field("pro_model", &self.pro_model)
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl InsightClient {
    /// Creates a client from explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InsightError::InvalidBaseUrl`] if
    /// `options.base_url` does not parse.
    pub fn new(api_key: &str, options: ClientOptions) -> Result<Self, InsightError> {
        let mut builder = Client::builder().user_agent(options.user_agent.as_str());
        if let Some(secs) = options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash, so joining the endpoint path appends
        // to the base path instead of replacing its last segment.
        let normalised = format!("{}/", options.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| InsightError::InvalidBaseUrl {
            base_url: options.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            fast_model: options.fast_model,
            pro_model: options.pro_model,
        })
    }

    /// Creates a client from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`InsightClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, InsightError> {
        Self::new(&config.genai_api_key, ClientOptions::from_app_config(config))
    }

    /// Creates a client with default models against a custom base URL
    /// (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`InsightClient::new`].
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, InsightError> {
        Self::new(
            api_key,
            ClientOptions {
                base_url: base_url.to_string(),
                ..ClientOptions::default()
            },
        )
    }

    /// Three revenue insights for `data_context`, or an empty list on failure.
    pub async fn smart_insights(&self, data_context: &str) -> Vec<InsightItem> {
        self.fetch(&SmartInsights { data_context })
            .await
            .into_inner()
    }

    /// Executive strategy report for `data_context`, or `None` on failure.
    pub async fn executive_report(&self, data_context: &str) -> Option<ExecutiveReport> {
        self.fetch(&ExecutiveReportRequest { data_context })
            .await
            .into_inner()
    }

    /// Sentiment verdict for one comment, or
    /// [`FeedbackAnalysis::unavailable`] on failure.
    pub async fn analyze_feedback(&self, comment: &str) -> FeedbackAnalysis {
        self.fetch(&FeedbackSentiment { comment })
            .await
            .into_inner()
    }

    /// Runs `request`, substituting its fallback on any failure.
    ///
    /// Failures are logged and never returned; the [`Outcome`] variant tells
    /// the caller which path was taken.
    pub async fn fetch<R: InsightRequest>(&self, request: &R) -> Outcome<R::Output> {
        match self.try_fetch(request).await {
            Ok(value) => Outcome::Populated(value),
            Err(e) => {
                tracing::error!(
                    operation = R::NAME,
                    model = self.model_for(request.tier()),
                    error = %e,
                    "insight request failed; using fallback"
                );
                Outcome::Fallback(request.fallback())
            }
        }
    }

    /// Runs `request` and returns the typed result or the cause of failure.
    ///
    /// # Errors
    ///
    /// Any [`InsightError`] from the call, the envelope, or `request.parse`.
    pub async fn try_fetch<R: InsightRequest>(
        &self,
        request: &R,
    ) -> Result<R::Output, InsightError> {
        let model = self.model_for(request.tier());
        let text = self
            .generate(R::NAME, model, &request.prompt(), &request.schema())
            .await?;
        request.parse(&text)
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast_model,
            ModelTier::Pro => &self.pro_model,
        }
    }

    /// Builds `{base}/v1beta/models/{model}:generateContent`.
    fn endpoint(&self, model: &str) -> Result<Url, InsightError> {
        self.base_url
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| InsightError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends one generation request and returns the candidate text.
    ///
    /// # Errors
    ///
    /// - [`InsightError::Http`] on network failure.
    /// - [`InsightError::Api`] on a non-2xx status.
    /// - [`InsightError::Deserialize`] if the envelope is not valid JSON.
    /// - [`InsightError::Blocked`] / [`InsightError::EmptyResponse`] when no
    ///   text came back.
    async fn generate(
        &self,
        operation: &str,
        model: &str,
        prompt: &str,
        schema: &Schema,
    ) -> Result<String, InsightError> {
        let url = self.endpoint(model)?;
        let body = GenerateContentRequest::json(prompt, schema);

        tracing::debug!(operation, model, "sending generation request");
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(InsightError::Api {
                status: status.as_u16(),
                message: Self::api_error_message(&raw),
            });
        }

        let envelope: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| InsightError::Deserialize {
                context: format!("{operation} envelope"),
                source: e,
            })?;

        match envelope.text() {
            Some(text) => Ok(text),
            None => match envelope.block_reason() {
                Some(reason) => Err(InsightError::Blocked(reason.to_string())),
                None => Err(InsightError::EmptyResponse {
                    operation: operation.to_string(),
                }),
            },
        }
    }

    /// Pulls `error.message` out of an error body, falling back to the raw text.
    fn api_error_message(raw: &str) -> String {
        serde_json::from_str::<ApiErrorEnvelope>(raw).map_or_else(
            |_| {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    "unknown error".to_string()
                } else {
                    trimmed.to_string()
                }
            },
            |envelope| envelope.error.message,
        )
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
