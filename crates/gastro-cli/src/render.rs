//! Plain-text rendering of insight results.
//!
//! Absent report fields are replaced with the analyst view's placeholder copy.

use std::fmt::Write;

use gastro_core::Feedback;
use gastro_insights::{ExecutiveReport, InsightItem};

pub(crate) const GREETING_PLACEHOLDER: &str = "Greetings, Strategic Lead.";
pub(crate) const SUMMARY_PLACEHOLDER: &str = "Revenue trends across the Bharat market are \
     indicating strong growth. Here are the 3 pillars for your next quarter.";
pub(crate) const PREDICTION_PLACEHOLDER: &str = "Expecting a surge in high-ticket catering \
     orders this wedding season. Scaling logistics now is critical.";
pub(crate) const NO_INSIGHTS: &str = "No insights available right now.";

pub(crate) fn insights(items: &[InsightItem]) -> String {
    if items.is_empty() {
        return format!("{NO_INSIGHTS}\n");
    }

    let mut out = String::new();
    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", idx + 1, item.impact, item.title);
        let _ = writeln!(out, "   {}", item.description);
    }
    out
}

pub(crate) fn report(report: Option<&ExecutiveReport>) -> String {
    let greeting = report
        .and_then(|r| r.greeting.as_deref())
        .unwrap_or(GREETING_PLACEHOLDER);
    let summary = report
        .and_then(|r| r.summary.as_deref())
        .unwrap_or(SUMMARY_PLACEHOLDER);
    let prediction = report
        .and_then(|r| r.quarterly_prediction.as_deref())
        .unwrap_or(PREDICTION_PLACEHOLDER);

    let mut out = String::new();
    let _ = writeln!(out, "{greeting}");
    let _ = writeln!(out, "{summary}");
    let _ = writeln!(out);

    if let Some(r) = report {
        for (idx, pillar) in r.pillars.iter().enumerate() {
            let _ = writeln!(out, "Pillar {}: {}", idx + 1, pillar.label);
            let _ = writeln!(out, "   {}", pillar.strategy);
        }
        if !r.pillars.is_empty() {
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(out, "Quarterly Outlook");
    let _ = writeln!(out, "   \"{prediction}\"");
    out
}

pub(crate) fn feedback_table(records: &[Feedback]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6}{:<20}{:<8}{:<11}COMMENT",
        "ID", "CUSTOMER", "RATING", "SENTIMENT"
    );
    for record in records {
        let sentiment = record
            .sentiment
            .map_or_else(|| "pending".to_string(), |s| s.to_string());
        let _ = writeln!(
            out,
            "{:<6}{:<20}{:<8}{:<11}{}",
            record.id, record.customer_name, record.rating, sentiment, record.comment
        );
        if let Some(analysis) = &record.analysis {
            let _ = writeln!(out, "{:<45}> {analysis}", "");
        }
    }
    out
}
