//! The three insight operations and their prompts, schemas and fallbacks.
//!
//! | operation                  | tier | fallback                          |
//! |----------------------------|------|-----------------------------------|
//! | [`SmartInsights`]          | fast | empty list                        |
//! | [`ExecutiveReportRequest`] | pro  | `None`                            |
//! | [`FeedbackSentiment`]      | fast | neutral, "processing unavailable" |

mod feedback;
mod insights;
mod report;

pub use feedback::FeedbackSentiment;
pub use insights::SmartInsights;
pub use report::ExecutiveReportRequest;
