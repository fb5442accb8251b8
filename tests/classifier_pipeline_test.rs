// tests/classifier_pipeline_test.rs
// End-to-end pipeline behavior against a scripted gateway stub: the five
// canonical reply scenarios, the repair bound, and the fallback paths.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use guestdesk::classifier::{ClassificationRequest, Classifier};
use guestdesk::llm::{ChatMessage, GatewayError, LlmGateway};
use guestdesk::taxonomy::{ServiceCategory, Urgency};

/// Gateway stub that replays a scripted sequence of replies and counts calls.
struct ScriptedGateway {
    replies: Mutex<Vec<Result<String, GatewayError>>>,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    fn new(replies: Vec<Result<String, GatewayError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn invoke(&self, _messages: Vec<ChatMessage>) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        assert!(!replies.is_empty(), "gateway called more times than scripted");
        replies.remove(0)
    }
}

fn classifier_with(replies: Vec<Result<String, GatewayError>>) -> (Classifier, Arc<ScriptedGateway>) {
    let gateway = ScriptedGateway::new(replies);
    (Classifier::new(gateway.clone()), gateway)
}

fn request(message: &str) -> ClassificationRequest {
    ClassificationRequest::new(message)
}

const GREETING_REPLY: &str = r#"{
    "should_create_ticket": false,
    "categories": [],
    "confidence": 0.98,
    "reasoning": "greeting",
    "suggested_priority": "low",
    "estimated_completion_time": null
}"#;

const COFFEE_REPLY: &str = r#"{
    "should_create_ticket": true,
    "categories": [
        {"category": "service_fb", "message": "Guest requests coffee delivery", "urgency": "medium"}
    ],
    "confidence": 0.95,
    "reasoning": "explicit food/beverage request",
    "suggested_priority": "medium",
    "estimated_completion_time": "10-15 minutes"
}"#;

#[tokio::test]
async fn test_greeting_produces_exact_result() {
    let (classifier, gateway) = classifier_with(vec![Ok(GREETING_REPLY.to_string())]);

    let result = classifier.classify(&request("Hello, good morning!")).await;

    assert!(!result.should_create_ticket);
    assert!(result.categories.is_empty());
    assert!((result.confidence - 0.98).abs() < 1e-6);
    assert_eq!(result.reasoning, "greeting");
    assert_eq!(result.suggested_priority, "low");
    assert_eq!(result.estimated_completion_time, None);
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_coffee_request_creates_single_category_ticket() {
    let (classifier, gateway) = classifier_with(vec![Ok(COFFEE_REPLY.to_string())]);

    let result = classifier.classify(&request("I need coffee")).await;

    assert!(result.should_create_ticket);
    assert_eq!(result.categories.len(), 1);
    assert_eq!(result.categories[0].category, ServiceCategory::ServiceFb);
    assert_eq!(result.categories[0].urgency, Urgency::Medium);
    assert!(result.categories[0].message.to_lowercase().contains("coffee"));
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_two_distinct_services_keep_reply_order() {
    let reply = r#"{
        "should_create_ticket": true,
        "categories": [
            {"category": "maintenance", "message": "Air conditioning unit requires repair", "urgency": "high"},
            {"category": "housekeeping", "message": "Deliver fresh towels", "urgency": "medium"}
        ],
        "confidence": 0.92,
        "reasoning": "two distinct services requested",
        "suggested_priority": "high",
        "estimated_completion_time": "30-60 minutes"
    }"#;
    let (classifier, _gateway) = classifier_with(vec![Ok(reply.to_string())]);

    let result = classifier.classify(&request("My AC is broken and I need towels")).await;

    assert!(result.should_create_ticket);
    assert_eq!(result.categories.len(), 2);
    assert_eq!(result.categories[0].category, ServiceCategory::Maintenance);
    assert_eq!(result.categories[0].urgency, Urgency::High);
    assert_eq!(result.categories[1].category, ServiceCategory::Housekeeping);
    assert_eq!(result.categories[1].urgency, Urgency::Medium);
}

#[tokio::test]
async fn test_fenced_reply_is_stripped_and_accepted() {
    let fenced = format!("```json\n{}\n```", COFFEE_REPLY);
    let (classifier, gateway) = classifier_with(vec![Ok(fenced)]);

    let result = classifier.classify(&request("I need coffee")).await;

    assert!(result.should_create_ticket);
    assert_eq!(result.categories.len(), 1);
    // No repair round: the sanitizer alone makes the reply parseable.
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_unterminated_quote_in_message_field_recovered() {
    let reply = concat!(
        "{\n",
        "    \"should_create_ticket\": true,\n",
        "    \"categories\": [\n",
        "        {\"category\": \"housekeeping\",\n",
        "         \"message\": \"Guest needs \"extra towels\" delivered\",\n",
        "         \"urgency\": \"medium\"}\n",
        "    ],\n",
        "    \"confidence\": 0.9,\n",
        "    \"reasoning\": \"housekeeping request\",\n",
        "    \"suggested_priority\": \"medium\",\n",
        "    \"estimated_completion_time\": \"20 minutes\"\n",
        "}",
    );
    let (classifier, gateway) = classifier_with(vec![Ok(reply.to_string())]);

    let result = classifier.classify(&request("I need more towels")).await;

    assert!(result.should_create_ticket);
    assert_eq!(result.categories.len(), 1);
    assert_eq!(result.categories[0].message, "Guest needs 'extra towels' delivered");
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_repair_recovers_from_malformed_first_reply() {
    let (classifier, gateway) = classifier_with(vec![
        Ok("I think the guest wants coffee, here you go: {broken".to_string()),
        Ok(COFFEE_REPLY.to_string()),
    ]);

    let result = classifier.classify(&request("I need coffee")).await;

    assert!(result.should_create_ticket);
    assert_eq!(result.categories.len(), 1);
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn test_repair_is_attempted_exactly_once() {
    let (classifier, gateway) = classifier_with(vec![
        Ok("still not json".to_string()),
        Ok("also not json".to_string()),
        // A third scripted reply would mask an over-eager retry loop; the
        // stub asserts it is never requested.
        Ok(COFFEE_REPLY.to_string()),
    ]);

    let result = classifier.classify(&request("I need coffee")).await;

    assert!(!result.should_create_ticket);
    assert!(result.categories.is_empty());
    assert_eq!(result.confidence, 0.0);
    assert!(result.reasoning.contains("classification failed"));
    assert_eq!(gateway.calls(), 2, "repair must stop after one attempt");
}

#[tokio::test]
async fn test_gateway_failure_yields_fallback() {
    let (classifier, gateway) = classifier_with(vec![Err(GatewayError::Transport(
        "connection refused".to_string(),
    ))]);

    let result = classifier.classify(&request("I need coffee")).await;

    assert!(!result.should_create_ticket);
    assert!(result.categories.is_empty());
    assert_eq!(result.confidence, 0.0);
    assert!(result.reasoning.contains("classification failed"));
    assert!(result.reasoning.contains("gateway failure"));
    assert_eq!(result.suggested_priority, "low");
    // A gateway failure never triggers the repair path.
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_gateway_failure_during_repair_is_terminal() {
    let (classifier, gateway) = classifier_with(vec![
        Ok("not json".to_string()),
        Err(GatewayError::Api {
            status: 429,
            body: "rate limited".to_string(),
        }),
    ]);

    let result = classifier.classify(&request("I need coffee")).await;

    assert!(!result.should_create_ticket);
    assert!(result.reasoning.contains("classification failed"));
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn test_unknown_category_in_reply_dropped_without_repair() {
    let reply = r#"{
        "should_create_ticket": true,
        "categories": [
            {"category": "maintenance", "message": "Fix the TV", "urgency": "medium"},
            {"category": "valet_parking", "message": "Park the car", "urgency": "low"}
        ],
        "confidence": 0.85,
        "reasoning": "mixed reply",
        "suggested_priority": "medium"
    }"#;
    let (classifier, gateway) = classifier_with(vec![Ok(reply.to_string())]);

    let result = classifier.classify(&request("TV is broken, also park my car")).await;

    assert_eq!(result.categories.len(), 1);
    assert_eq!(result.categories[0].category, ServiceCategory::Maintenance);
    // Field defects are recovered locally, not sent back for repair.
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_out_of_range_confidence_clamped() {
    let reply = r#"{
        "should_create_ticket": false,
        "categories": [],
        "confidence": 1.7,
        "reasoning": "overconfident",
        "suggested_priority": "low"
    }"#;
    let (classifier, _gateway) = classifier_with(vec![Ok(reply.to_string())]);

    let result = classifier.classify(&request("hi")).await;

    assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
    assert_eq!(result.confidence, 1.0);
}

#[tokio::test]
async fn test_batch_preserves_order_and_isolates_failures() {
    let (classifier, gateway) = classifier_with(vec![
        Ok(GREETING_REPLY.to_string()),
        Err(GatewayError::Transport("boom".to_string())),
        Ok(COFFEE_REPLY.to_string()),
    ]);

    let requests = vec![
        request("Hello!"),
        request("My AC is broken"),
        request("I need coffee"),
    ];
    let results = classifier.classify_batch(&requests).await;

    assert_eq!(results.len(), 3);
    assert!(!results[0].should_create_ticket);
    assert_eq!(results[0].reasoning, "greeting");
    assert!(results[1].reasoning.contains("classification failed"));
    assert!(results[2].should_create_ticket);
    assert_eq!(results[2].categories[0].category, ServiceCategory::ServiceFb);
    assert_eq!(gateway.calls(), 3);
}

#[tokio::test]
async fn test_insights_passthrough_with_unknown_keys() {
    let reply = r#"{
        "sentiment": "frustrated",
        "emotion_detected": "urgent",
        "implicit_needs": ["immediate attention"],
        "completely_novel_key": {"nested": true}
    }"#;
    let (classifier, gateway) = classifier_with(vec![Ok(reply.to_string())]);

    let payload = classifier.insights("URGENT! My AC is broken!").await;

    assert_eq!(payload["sentiment"], "frustrated");
    assert_eq!(payload["completely_novel_key"]["nested"], true);
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_insights_failure_returns_error_payload_without_repair() {
    let (classifier, gateway) = classifier_with(vec![Ok("no json here".to_string())]);

    let payload = classifier.insights("anything").await;

    let error = payload["error"].as_str().unwrap();
    assert!(error.contains("insight generation failed"));
    // The advisory pipeline gets no repair round.
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_insights_gateway_failure_returns_error_payload() {
    let (classifier, _gateway) = classifier_with(vec![Err(GatewayError::Timeout(30))]);

    let payload = classifier.insights("anything").await;

    assert!(payload["error"].as_str().unwrap().contains("gateway failure"));
}

#[tokio::test]
async fn test_fenced_malformed_reply_still_gets_repair() {
    // Fence stripping succeeds but the body remains unparseable; the repair
    // round then supplies a usable reply.
    let (classifier, gateway) = classifier_with(vec![
        Ok("```json\n{\"should_create_ticket\": tru\n```".to_string()),
        Ok(GREETING_REPLY.to_string()),
    ]);

    let result = classifier.classify(&request("Hello")).await;

    assert!(!result.should_create_ticket);
    assert_eq!(result.reasoning, "greeting");
    assert_eq!(gateway.calls(), 2);
}
