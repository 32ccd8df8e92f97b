//! Feedback board behaviour against a mocked generation service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gastro_core::{Feedback, Sentiment};
use gastro_insights::{FeedbackBoard, InsightClient};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn test_client(base_url: &str) -> InsightClient {
    InsightClient::with_base_url("test-key", base_url)
        .expect("client construction should not fail")
}

fn feedback(id: &str, comment: &str, rating: u8) -> Feedback {
    Feedback {
        id: id.to_string(),
        customer_name: format!("Guest {id}"),
        comment: comment.to_string(),
        rating,
        sentiment: None,
        analysis: None,
    }
}

/// Answers every request with a positive verdict and counts what it served.
struct CountingResponder {
    served: Arc<AtomicUsize>,
}

impl Respond for CountingResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.served.fetch_add(1, Ordering::SeqCst);
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": r#"{"sentiment":"positive","analysis":"Happy guest."}"# }] }
            }]
        }))
    }
}

/// Wraps another responder and holds each answer back for `delay`.
struct DelayedResponder {
    inner: CountingResponder,
    delay: Duration,
}

impl Respond for DelayedResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.inner.respond(request).set_delay(self.delay)
    }
}

fn prompt_of(request: &Request) -> String {
    let body: serde_json::Value = request.body_json().expect("request body is JSON");
    body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn analyze_merges_verdict_without_touching_other_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{
                    "text": r#"{"sentiment":"negative","analysis":"Customer frustrated by service lapses."}"#
                }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut board = FeedbackBoard::new(vec![feedback(
        "2",
        "Table was sticky and the waiter forgot our drinks twice.",
        2,
    )]);

    assert!(board.analyze(&client, "2").await);

    let record = board.get("2").unwrap();
    assert_eq!(record.sentiment, Some(Sentiment::Negative));
    assert_eq!(
        record.analysis.as_deref(),
        Some("Customer frustrated by service lapses.")
    );
    assert_eq!(record.id, "2");
    assert_eq!(record.customer_name, "Guest 2");
    assert_eq!(
        record.comment,
        "Table was sticky and the waiter forgot our drinks twice."
    );
    assert_eq!(record.rating, 2);
    assert!(!board.is_analyzing("2"));
}

#[tokio::test]
async fn analyze_skips_classified_and_unknown_records() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut done = feedback("1", "Great", 5);
    done.sentiment = Some(Sentiment::Positive);
    done.analysis = Some("Already classified.".to_string());
    let mut board = FeedbackBoard::new(vec![done]);

    assert!(!board.analyze(&client, "1").await);
    assert!(!board.analyze(&client, "missing").await);
    assert_eq!(
        board.get("1").unwrap().analysis.as_deref(),
        Some("Already classified.")
    );
}

#[tokio::test]
async fn failed_classification_merges_fallback_verdict() {
    let client = test_client("http://127.0.0.1:1");
    let mut board = FeedbackBoard::new(vec![feedback("4", "Decent but overpriced.", 3)]);

    assert!(board.analyze(&client, "4").await);

    let record = board.get("4").unwrap();
    assert_eq!(record.sentiment, Some(Sentiment::Neutral));
    assert_eq!(
        record.analysis.as_deref(),
        Some("Feedback processing unavailable.")
    );
    assert_eq!(record.rating, 3);
}

#[tokio::test]
async fn batch_is_sequential_and_issues_one_request_per_pending_record() {
    let server = MockServer::start().await;
    let served = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .respond_with(CountingResponder {
            served: Arc::clone(&served),
        })
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut already = feedback("2", "Sticky table.", 2);
    already.sentiment = Some(Sentiment::Negative);
    already.analysis = Some("Service lapses.".to_string());
    let mut board = FeedbackBoard::new(vec![
        feedback("1", "The risotto was incredible.", 4),
        already,
        feedback("3", "Loved the atmosphere.", 5),
        feedback("4", "Decent but overpriced.", 3),
    ]);

    let mut merged_ids = Vec::new();
    let requests = board
        .analyze_pending(&client, |record| {
            merged_ids.push(record.id.clone());
            // Request k+1 must not have been served before merge k.
            assert_eq!(served.load(Ordering::SeqCst), merged_ids.len());
        })
        .await;

    assert_eq!(requests, 3);
    assert_eq!(merged_ids, vec!["1", "3", "4"]);
    assert!(board.pending_ids().is_empty());
    assert_eq!(board.get("2").unwrap().sentiment, Some(Sentiment::Negative));
    assert_eq!(board.get("3").unwrap().sentiment, Some(Sentiment::Positive));

    let received = server.received_requests().await.expect("recording enabled");
    let prompts: Vec<String> = received.iter().map(prompt_of).collect();
    assert!(prompts[0].contains("The risotto was incredible."));
    assert!(prompts[1].contains("Loved the atmosphere."));
    assert!(prompts[2].contains("Decent but overpriced."));
}

#[tokio::test]
async fn second_batch_issues_no_requests() {
    let server = MockServer::start().await;
    let served = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .respond_with(CountingResponder {
            served: Arc::clone(&served),
        })
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut board = FeedbackBoard::new(vec![feedback("1", "Nice.", 4)]);

    assert_eq!(board.analyze_pending(&client, |_| {}).await, 1);
    assert_eq!(board.analyze_pending(&client, |_| {}).await, 0);
    assert_eq!(served.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn analyze_skips_record_already_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut board = FeedbackBoard::new(vec![feedback("1", "Nice.", 4)]);

    assert!(board.begin_analysis("1").is_some());
    assert!(!board.analyze(&client, "1").await);
    assert!(board.is_analyzing("1"));

    assert_eq!(board.analyze_pending(&client, |_| {}).await, 0);
    assert!(board.get("1").unwrap().sentiment.is_none());
}

#[tokio::test]
async fn abandoned_analysis_clears_in_flight_mark() {
    let server = MockServer::start().await;
    let served = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .respond_with(DelayedResponder {
            inner: CountingResponder {
                served: Arc::clone(&served),
            },
            delay: Duration::from_millis(300),
        })
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut board = FeedbackBoard::new(vec![feedback("1", "Nice.", 4)]);

    let abandoned =
        tokio::time::timeout(Duration::from_millis(50), board.analyze(&client, "1")).await;
    assert!(
        abandoned.is_err(),
        "call should still be waiting on the delayed response"
    );
    assert!(!board.is_analyzing("1"));
    assert!(board.get("1").unwrap().sentiment.is_none());

    assert!(board.analyze(&client, "1").await);
    assert!(!board.is_analyzing("1"));
    assert_eq!(board.get("1").unwrap().sentiment, Some(Sentiment::Positive));
    assert_eq!(served.load(Ordering::SeqCst), 2);
}
