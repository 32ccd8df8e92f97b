use crate::error::InsightError;
use crate::policy::{parse_json, validate, InsightRequest, ModelTier};
use crate::schema::Schema;
use crate::types::FeedbackAnalysis;

/// Sentiment classification of one customer comment.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackSentiment<'a> {
    pub comment: &'a str,
}

impl InsightRequest for FeedbackSentiment<'_> {
    type Output = FeedbackAnalysis;

    const NAME: &'static str = "analyze_feedback";

    fn tier(&self) -> ModelTier {
        ModelTier::Fast
    }

    fn prompt(&self) -> String {
        format!(
            "Classify the sentiment of the following restaurant feedback.\n\
             Feedback: \"{}\"",
            self.comment
        )
    }

    fn schema(&self) -> Schema {
        Schema::object(vec![
            (
                "sentiment",
                Schema::string_enum(&["positive", "neutral", "negative"])
                    .with_description("Must be 'positive', 'neutral', or 'negative'."),
            ),
            (
                "analysis",
                Schema::string()
                    .with_description("A short, one-sentence summary of the sentiment findings."),
            ),
        ])
    }

    fn parse(&self, text: &str) -> Result<Self::Output, InsightError> {
        let value = parse_json(Self::NAME, text)?;
        validate(Self::NAME, value)
    }

    fn fallback(&self) -> Self::Output {
        FeedbackAnalysis::unavailable()
    }
}
