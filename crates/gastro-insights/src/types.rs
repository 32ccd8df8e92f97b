use gastro_core::{Feedback, Sentiment};
use serde::{Deserialize, Serialize};

/// Analysis text used when a comment could not be classified.
pub const FEEDBACK_UNAVAILABLE: &str = "Feedback processing unavailable.";

/// Expected sales impact of an insight.
///
/// The service is asked for `High`, `Medium`, or `Low`, but the field is free
/// text in practice. Anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Impact {
    High,
    Medium,
    Low,
    Other(String),
}

impl From<String> for Impact {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "High" => Impact::High,
            "Medium" => Impact::Medium,
            "Low" => Impact::Low,
            _ => Impact::Other(raw),
        }
    }
}

impl From<Impact> for String {
    fn from(impact: Impact) -> Self {
        impact.to_string()
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::High => write!(f, "High"),
            Impact::Medium => write!(f, "Medium"),
            Impact::Low => write!(f, "Low"),
            Impact::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// One actionable insight card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightItem {
    pub title: String,
    pub description: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub label: String,
    pub strategy: String,
}

/// Strategic summary for the analyst view.
///
/// The text fields are optional because the view has placeholder copy for
/// each of them. `pillars` has none, so a payload without it is rejected.
/// Three pillars are requested, but any count is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveReport {
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub pillars: Vec<Pillar>,
    #[serde(default)]
    pub quarterly_prediction: Option<String>,
}

/// Classifier verdict for a single comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackAnalysis {
    pub sentiment: Sentiment,
    pub analysis: String,
}

impl FeedbackAnalysis {
    /// The verdict used when classification fails.
    ///
    /// A sentiment badge has no "unknown" state, so this is a concrete value
    /// rather than an absence.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            analysis: FEEDBACK_UNAVAILABLE.to_string(),
        }
    }

    /// Write this verdict onto `record`, leaving its identity, comment and
    /// rating untouched.
    pub fn merge_into(self, record: &mut Feedback) {
        record.sentiment = Some(self.sentiment);
        record.analysis = Some(self.analysis);
    }
}
