use crate::error::InsightError;
use crate::policy::{parse_json, InsightRequest, ModelTier};
use crate::schema::Schema;
use crate::types::InsightItem;

/// Three actionable revenue insights for the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct SmartInsights<'a> {
    pub data_context: &'a str,
}

impl InsightRequest for SmartInsights<'_> {
    type Output = Vec<InsightItem>;

    const NAME: &'static str = "smart_insights";

    fn tier(&self) -> ModelTier {
        ModelTier::Fast
    }

    fn prompt(&self) -> String {
        format!(
            "You are a sales performance consultant for the Indian restaurant industry.\n\
             Using the sales data below (amounts in ₹), give 3 actionable insights that \
             would raise revenue and order volume.\n\
             Focus on regional tastes, festive sales peaks, and growth in average ticket size.\n\
             Data Summary: {}",
            self.data_context
        )
    }

    fn schema(&self) -> Schema {
        Schema::array(Schema::object(vec![
            ("title", Schema::string()),
            ("description", Schema::string()),
            (
                "impact",
                Schema::string().with_description("High, Medium, or Low impact on sales"),
            ),
        ]))
    }

    /// Elements that do not match [`InsightItem`] are dropped with a warning;
    /// the rest are kept in order.
    fn parse(&self, text: &str) -> Result<Self::Output, InsightError> {
        let value = parse_json(Self::NAME, text)?;
        let serde_json::Value::Array(elements) = value else {
            return Err(InsightError::Validation {
                context: Self::NAME.to_string(),
                reason: "expected a JSON array of insights".to_string(),
            });
        };

        let total = elements.len();
        let items: Vec<InsightItem> = elements
            .into_iter()
            .filter_map(|v| match serde_json::from_value::<InsightItem>(v) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed insight element");
                    None
                }
            })
            .collect();

        if items.len() < total {
            tracing::debug!(kept = items.len(), total, "insight elements filtered");
        }
        Ok(items)
    }

    fn fallback(&self) -> Self::Output {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Impact;

    const REQUEST: SmartInsights<'static> = SmartInsights {
        data_context: "Sales are up 15% in the Mumbai region.",
    };

    #[test]
    fn prompt_embeds_data_context() {
        let prompt = REQUEST.prompt();
        assert!(prompt.contains("Data Summary: Sales are up 15% in the Mumbai region."));
        assert!(prompt.contains('₹'));
    }

    #[test]
    fn parses_items_verbatim() {
        let items = REQUEST
            .parse(
                r#"[{"title":"Push platters","description":"Bundle Paneer Tikka","impact":"High"},
                    {"title":"Diwali menu","description":"Limited sweets","impact":"Moderate"}]"#,
            )
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Push platters");
        assert_eq!(items[0].description, "Bundle Paneer Tikka");
        assert_eq!(items[0].impact, Impact::High);
        assert_eq!(items[1].impact, Impact::Other("Moderate".to_string()));
    }

    #[test]
    fn skips_elements_missing_required_fields() {
        let items = REQUEST
            .parse(r#"[{"title":"No description","impact":"Low"},{"title":"ok","description":"d","impact":"Low"}]"#)
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "ok");
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = REQUEST.parse(r#"{"title":"lonely"}"#).unwrap_err();
        assert!(matches!(err, InsightError::Validation { .. }));
    }

    #[test]
    fn rejects_truncated_json() {
        let err = REQUEST.parse(r#"[{"title":"cut"#).unwrap_err();
        assert!(matches!(err, InsightError::Deserialize { .. }));
    }

    #[test]
    fn fallback_is_empty() {
        assert!(REQUEST.fallback().is_empty());
    }
}
