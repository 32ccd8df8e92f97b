//! The contract every insight operation signs.
//!
//! An operation supplies its prompt, declared schema, model tier, a parser
//! from payload text to its typed result, and the value to degrade to when
//! any of that fails. `fallback` has no default, so an operation cannot exist
//! without stating its degradation behaviour.

use crate::error::InsightError;
use crate::schema::Schema;

/// Which model an operation runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Low-latency model for classification and short insight lists.
    Fast,
    /// Higher-capability model for long-form strategy.
    Pro,
}

pub trait InsightRequest {
    type Output;

    /// Short name used in logs and error context.
    const NAME: &'static str;

    fn tier(&self) -> ModelTier;

    fn prompt(&self) -> String;

    fn schema(&self) -> Schema;

    /// Convert the payload text into the typed result.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Deserialize`] for text that is not JSON and
    /// [`InsightError::Validation`] for JSON of the wrong shape.
    fn parse(&self, text: &str) -> Result<Self::Output, InsightError>;

    fn fallback(&self) -> Self::Output;
}

/// Parse payload text as untyped JSON, tagging failures with the operation name.
pub(crate) fn parse_json(context: &str, text: &str) -> Result<serde_json::Value, InsightError> {
    serde_json::from_str(text).map_err(|e| InsightError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

/// Convert parsed JSON into `T`, reporting shape mismatches as validation errors.
pub(crate) fn validate<T: serde::de::DeserializeOwned>(
    context: &str,
    value: serde_json::Value,
) -> Result<T, InsightError> {
    serde_json::from_value(value).map_err(|e| InsightError::Validation {
        context: context.to_string(),
        reason: e.to_string(),
    })
}
