//! Insight generation for GastroAI.
//!
//! Wraps a schema-constrained generative-AI endpoint with three operations:
//! dashboard insight cards, the analyst's executive report, and per-comment
//! feedback sentiment. Each operation turns a data context into a typed result
//! and falls back to a declared default when the call or the payload fails.

pub mod board;
pub mod client;
pub mod error;
pub mod operations;
pub mod policy;
pub mod schema;
pub mod state;
pub mod types;

mod wire;

pub use board::FeedbackBoard;
pub use client::{ClientOptions, InsightClient};
pub use error::InsightError;
pub use operations::{ExecutiveReportRequest, FeedbackSentiment, SmartInsights};
pub use policy::{InsightRequest, ModelTier};
pub use state::{LoadState, Outcome};
pub use types::{
    ExecutiveReport, FeedbackAnalysis, Impact, InsightItem, Pillar, FEEDBACK_UNAVAILABLE,
};
