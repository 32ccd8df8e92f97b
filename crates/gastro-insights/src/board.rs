//! In-memory feedback list with one-at-a-time sentiment classification.

use std::collections::HashSet;

use gastro_core::Feedback;

use crate::client::InsightClient;
use crate::types::FeedbackAnalysis;

/// Feedback records for one session, plus which of them are being classified.
#[derive(Debug, Default)]
pub struct FeedbackBoard {
    records: Vec<Feedback>,
    analyzing: HashSet<String>,
}

impl FeedbackBoard {
    #[must_use]
    pub fn new(records: Vec<Feedback>) -> Self {
        Self {
            records,
            analyzing: HashSet::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Feedback] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Feedback> {
        self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Feedback> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn is_analyzing(&self, id: &str) -> bool {
        self.analyzing.contains(id)
    }

    /// Ids of records without a sentiment, in list order.
    #[must_use]
    pub fn pending_ids(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.is_classified())
            .map(|r| r.id.clone())
            .collect()
    }

    /// Mark `id` as being classified and hand back its comment.
    ///
    /// Returns `None` for unknown ids, records that already carry a sentiment,
    /// and records already being classified. A `Some` must be followed by
    /// [`complete_analysis`](Self::complete_analysis) or
    /// [`cancel_analysis`](Self::cancel_analysis).
    pub fn begin_analysis(&mut self, id: &str) -> Option<String> {
        if self.analyzing.contains(id) {
            tracing::debug!(id, "feedback already being classified; skipping");
            return None;
        }
        let Some(comment) = self
            .get(id)
            .filter(|r| !r.is_classified())
            .map(|r| r.comment.clone())
        else {
            tracing::debug!(id, "feedback missing or already classified; skipping");
            return None;
        };

        self.analyzing.insert(id.to_string());
        Some(comment)
    }

    /// Merge a verdict into the record and clear its in-flight mark.
    ///
    /// Returns `false` (and merges nothing) when `id` was not begun.
    pub fn complete_analysis(&mut self, id: &str, analysis: FeedbackAnalysis) -> bool {
        if !self.analyzing.remove(id) {
            return false;
        }
        if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
            analysis.merge_into(record);
            tracing::info!(id, sentiment = ?record.sentiment, "feedback classified");
        }
        true
    }

    /// Clear the in-flight mark for `id` without touching the record.
    pub fn cancel_analysis(&mut self, id: &str) {
        if self.analyzing.remove(id) {
            tracing::debug!(id, "feedback classification abandoned");
        }
    }

    /// Classify one record and merge the verdict into it.
    ///
    /// Unknown ids, records that already carry a sentiment, and records already
    /// being classified are left alone and cost no request. If the returned
    /// future is dropped before it finishes, the in-flight mark is cleared.
    /// Returns whether a request was made.
    pub async fn analyze(&mut self, client: &InsightClient, id: &str) -> bool {
        let Some(comment) = self.begin_analysis(id) else {
            return false;
        };

        let guard = InFlight { board: self, id };
        let analysis = client.analyze_feedback(&comment).await;
        guard.board.complete_analysis(id, analysis);
        true
    }

    /// Classify every pending record, strictly one after another.
    ///
    /// The pending set is taken when the sweep starts. Each request is issued
    /// only after the previous verdict has been merged, and `on_merged` sees
    /// each record right after its merge. Returns the number of requests made.
    pub async fn analyze_pending<F>(&mut self, client: &InsightClient, mut on_merged: F) -> usize
    where
        F: FnMut(&Feedback),
    {
        let pending = self.pending_ids();
        let mut requests = 0;

        for id in &pending {
            if self.analyze(client, id).await {
                requests += 1;
                if let Some(record) = self.get(id) {
                    on_merged(record);
                }
            }
        }

        tracing::info!(requests, pending = pending.len(), "batch feedback analysis finished");
        requests
    }
}

/// Clears an in-flight mark when an `analyze` future is dropped mid-request.
struct InFlight<'a> {
    board: &'a mut FeedbackBoard,
    id: &'a str,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.board.cancel_analysis(self.id);
    }
}
