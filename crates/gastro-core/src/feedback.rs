use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// A customer feedback record.
///
/// `sentiment` and `analysis` start out empty and are filled in once by the
/// classifier; after that they stay put for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub customer_name: String,
    pub comment: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl Feedback {
    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.sentiment.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedbackFile {
    pub feedback: Vec<Feedback>,
}

/// Load and validate feedback records from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_feedback(path: &Path) -> Result<FeedbackFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FeedbackFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_feedback(&content)
}

fn parse_feedback(content: &str) -> Result<FeedbackFile, ConfigError> {
    let file: FeedbackFile = serde_yaml::from_str(content)?;
    validate_feedback(&file)?;
    Ok(file)
}

fn validate_feedback(file: &FeedbackFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for record in &file.feedback {
        if record.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feedback id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(record.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate feedback id: '{}'",
                record.id
            )));
        }

        if record.customer_name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "feedback '{}' has an empty customer name",
                record.id
            )));
        }

        if record.comment.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "feedback '{}' has an empty comment",
                record.id
            )));
        }

        if !(1..=5).contains(&record.rating) {
            return Err(ConfigError::Validation(format!(
                "feedback '{}' has invalid rating {}; must be 1 to 5",
                record.id, record.rating
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
feedback:
  - id: '1'
    customerName: Emily Watson
    comment: The risotto was incredible, but the service was a bit slow today.
    rating: 4
  - id: '2'
    customerName: James Chen
    comment: Table was sticky and the waiter forgot our drinks twice.
    rating: 2
    sentiment: negative
    analysis: Service lapses.
";

    #[test]
    fn shipped_feedback_file_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("feedback.yaml");
        assert!(path.exists(), "feedback.yaml missing at {path:?}");
        let file = load_feedback(&path).expect("failed to load feedback.yaml");
        assert_eq!(file.feedback.len(), 4);
        assert!(
            file.feedback.iter().all(|r| !r.is_classified()),
            "shipped records should start unclassified"
        );
        assert_eq!(file.feedback[1].customer_name, "James Chen");
        assert_eq!(file.feedback[1].rating, 2);
    }

    #[test]
    fn parses_records_with_and_without_sentiment() {
        let file = parse_feedback(SAMPLE).expect("sample should parse");
        assert_eq!(file.feedback.len(), 2);
        assert_eq!(file.feedback[0].customer_name, "Emily Watson");
        assert!(!file.feedback[0].is_classified());
        assert_eq!(file.feedback[1].sentiment, Some(Sentiment::Negative));
        assert_eq!(file.feedback[1].analysis.as_deref(), Some("Service lapses."));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let yaml = r"
feedback:
  - { id: '1', customerName: A, comment: fine, rating: 3 }
  - { id: '1', customerName: B, comment: fine, rating: 3 }
";
        let err = parse_feedback(yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")),
            "got: {err:?}"
        );
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let yaml = r"
feedback:
  - { id: '1', customerName: A, comment: fine, rating: 6 }
";
        assert!(matches!(
            parse_feedback(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn rejects_empty_comment() {
        let yaml = r"
feedback:
  - { id: '1', customerName: A, comment: '  ', rating: 3 }
";
        assert!(matches!(
            parse_feedback(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn rejects_unknown_sentiment() {
        let yaml = r"
feedback:
  - { id: '1', customerName: A, comment: ok, rating: 3, sentiment: furious }
";
        assert!(matches!(
            parse_feedback(yaml),
            Err(ConfigError::FeedbackFileParse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_feedback(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn feedback_serializes_camel_case_without_empty_fields() {
        let record = Feedback {
            id: "9".to_string(),
            customer_name: "Ravi".to_string(),
            comment: "Great biryani".to_string(),
            rating: 5,
            sentiment: None,
            analysis: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["customerName"], "Ravi");
        assert!(json.get("sentiment").is_none());
        assert!(json.get("analysis").is_none());
    }
}
