use crate::error::InsightError;
use crate::policy::{parse_json, validate, InsightRequest, ModelTier};
use crate::schema::Schema;
use crate::types::ExecutiveReport;

/// Executive strategy summary for the analyst view.
#[derive(Debug, Clone, Copy)]
pub struct ExecutiveReportRequest<'a> {
    pub data_context: &'a str,
}

impl InsightRequest for ExecutiveReportRequest<'_> {
    type Output = Option<ExecutiveReport>;

    const NAME: &'static str = "executive_report";

    fn tier(&self) -> ModelTier {
        ModelTier::Pro
    }

    fn prompt(&self) -> String {
        format!(
            "You are Agent Gastro, a senior Sales Analyst for the Bharat market.\n\
             Write an executive strategic summary that uses ONLY sales and revenue metrics \
             in Indian Rupees (₹). Leave out maintenance and occupancy.\n\
             Include:\n\
             1. A strategic greeting suited to an Indian business lead.\n\
             2. A summary of sales velocity and revenue growth, in Lakhs/Crores where it fits.\n\
             3. Three sales-focused growth pillars (for example AOV, Festive Performance, \
             high-margin items such as Platters).\n\
             4. A concrete quarterly sales forecast for the Indian market.\n\
             Dataset: {}",
            self.data_context
        )
    }

    fn schema(&self) -> Schema {
        Schema::object(vec![
            ("greeting", Schema::string()),
            ("summary", Schema::string()),
            (
                "pillars",
                Schema::array(Schema::object(vec![
                    ("label", Schema::string()),
                    ("strategy", Schema::string()),
                ])),
            ),
            ("quarterlyPrediction", Schema::string()),
        ])
    }

    fn parse(&self, text: &str) -> Result<Self::Output, InsightError> {
        let value = parse_json(Self::NAME, text)?;
        validate::<ExecutiveReport>(Self::NAME, value).map(Some)
    }

    fn fallback(&self) -> Self::Output {
        None
    }
}
