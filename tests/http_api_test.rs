//! HTTP API tests against the full router
//! Run with: cargo test --test http_api_test

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use ujamaa_gateway::application::errors::GatewayError;
use ujamaa_gateway::application::services::FALLBACK_TIPS;
use ujamaa_gateway::domain::traits::{DeliveryReport, Gateway};
use ujamaa_gateway::infrastructure::config::Config;
use ujamaa_gateway::infrastructure::database::SqliteStore;
use ujamaa_gateway::infrastructure::gateway::ConsoleGateway;
use ujamaa_gateway::infrastructure::http::{router, AppState};

fn app_with(config: Config) -> (Router, Arc<ConsoleGateway>) {
    let store = Arc::new(SqliteStore::in_memory().expect("in-memory store"));
    let gateway = Arc::new(ConsoleGateway::new());
    let state = AppState::new(&config, store, gateway.clone(), None);
    (router(state), gateway)
}

fn app() -> (Router, Arc<ConsoleGateway>) {
    app_with(Config::default())
}

/// Gateway whose every send fails
struct OfflineGateway;

#[async_trait::async_trait]
impl Gateway for OfflineGateway {
    fn name(&self) -> &str {
        "offline"
    }

    async fn send_sms(&self, _: &[String], _: &str) -> Result<DeliveryReport, GatewayError> {
        Err(GatewayError::Network("connection refused".to_string()))
    }
}

fn offline_app() -> Router {
    let store = Arc::new(SqliteStore::in_memory().expect("in-memory store"));
    router(AppState::new(&Config::default(), store, Arc::new(OfflineGateway), None))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    serde_json::from_str(&text(response).await).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_ussd_callback_returns_plain_text() {
    let (app, _) = app();
    let response = app
        .clone()
        .oneshot(post_form(
            "/api/ussd",
            "sessionId=ATUid_1&serviceCode=%2A384%23&phoneNumber=%2B254700000001&text=",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert!(text(response).await.starts_with("CON Welcome to Ujamaa Health"));

    let response = app
        .oneshot(post_form(
            "/api/ussd",
            "sessionId=ATUid_1&serviceCode=%2A384%23&phoneNumber=%2B254700000001&text=1%2A2",
        ))
        .await
        .unwrap();
    assert!(text(response).await.starts_with("CON Appointment Booking"));
}

#[tokio::test]
async fn test_ussd_malformed_form_is_bad_request() {
    let (app, _) = app();
    let response = app
        .oneshot(post_form("/api/ussd", "text=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        text(response).await,
        "END An error occurred. Please try again later."
    );
}

#[tokio::test]
async fn test_sms_endpoint() {
    let (app, _) = app();
    let response = app
        .oneshot(post_json(
            "/api/sms",
            json!({"message": "FIND CLINIC NAIROBI", "phoneNumber": "+254700000001"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "SMS processed successfully");
    let reply = body["response"].as_str().unwrap();
    assert!(reply.contains("CLINIC") && reply.contains("NAIROBI"), "{reply}");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/sms")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn test_sms_rate_limit() {
    let mut config = Config::default();
    config.security.rate_limit.max_requests = 2;
    let (app, _) = app_with(config);

    let body = json!({"message": "TIP", "phoneNumber": "+254700000009"});
    for _ in 0..2 {
        let response = app.clone().oneshot(post_json("/api/sms", body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app.oneshot(post_json("/api/sms", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_emergency_alert_sends_sms() {
    let (app, gateway) = app();
    let response = app
        .oneshot(post_json(
            "/api/emergency-alerts",
            json!({
                "phoneNumber": "+254700000001",
                "type": "Medical",
                "location": "Nairobi",
                "details": "Ambulance needed"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Alert sent successfully");
    assert_eq!(body["alertId"], "ALT0001");

    let sent = gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].1,
        "Emergency Alert: Medical\nLocation: Nairobi\nDetails: Ambulance needed"
    );
}

#[tokio::test]
async fn test_sms_outage_does_not_fail_committed_writes() {
    let app = offline_app();
    let create = json!({
        "action": "create",
        "phoneNumber": "+254700000001",
        "reminderData": {"title": "Blood pressure pill", "time": "08:00"}
    });

    let created = app.clone().oneshot(post_json("/api/reminders", create)).await.unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    let body = json_body(created).await;
    assert_eq!(body["success"], true);
    assert!(body["smsResponse"].is_null());

    // A single create leaves a single row, so clients have no reason to retry
    let listed = app
        .clone()
        .oneshot(post_json(
            "/api/reminders",
            json!({"action": "list", "phoneNumber": "+254700000001"}),
        ))
        .await
        .unwrap();
    assert_eq!(json_body(listed).await["reminders"].as_array().unwrap().len(), 1);

    let alert = app
        .oneshot(post_json(
            "/api/emergency-alerts",
            json!({"phoneNumber": "+254700000001", "type": "Fire", "location": "Kisumu"}),
        ))
        .await
        .unwrap();
    assert_eq!(alert.status(), StatusCode::OK);
    let body = json_body(alert).await;
    assert_eq!(body["alertId"], "ALT0001");
    assert_eq!(body["message"], "Alert recorded but SMS delivery failed");
    assert!(body["smsResponse"].is_null());
}

#[tokio::test]
async fn test_reminders_crud() {
    let (app, gateway) = app();
    let created = app
        .clone()
        .oneshot(post_json(
            "/api/reminders",
            json!({
                "action": "create",
                "phoneNumber": "+254700000001",
                "reminderData": {"title": "Blood pressure pill", "time": "08:00", "days": ["Monday"]}
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    let body = json_body(created).await;
    assert_eq!(body["message"], "Reminder created successfully");
    let id = body["reminderData"]["id"].as_i64().unwrap();
    assert_eq!(gateway.sent().len(), 1);

    let listed = app
        .clone()
        .oneshot(post_json(
            "/api/reminders",
            json!({"action": "list", "phoneNumber": "+254700000001"}),
        ))
        .await
        .unwrap();
    assert_eq!(json_body(listed).await["reminders"].as_array().unwrap().len(), 1);

    let missing = app
        .clone()
        .oneshot(post_json(
            "/api/reminders",
            json!({"action": "delete", "phoneNumber": "+254700000001", "reminderData": {"id": id + 10}}),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let deleted = app
        .clone()
        .oneshot(post_json(
            "/api/reminders",
            json!({"action": "delete", "phoneNumber": "+254700000001", "reminderData": {"id": id.to_string()}}),
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let invalid = app
        .oneshot(post_json(
            "/api/reminders",
            json!({"action": "snooze", "phoneNumber": "+254700000001"}),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(invalid).await["message"], "Invalid action");
}

#[tokio::test]
async fn test_personalized_tips_fall_back_without_llm() {
    let (app, _) = app();
    let response = app
        .oneshot(post_json(
            "/api/personalized-tips",
            json!({"healthProfile": {"age": 42, "conditions": ["diabetes"]}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let tips: Vec<String> = serde_json::from_value(body["tips"].clone()).unwrap();
    assert_eq!(tips, FALLBACK_TIPS.iter().map(|t| t.to_string()).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_voice_and_chat() {
    let (app, _) = app();
    let voice = app
        .clone()
        .oneshot(post_json(
            "/api/voice",
            json!({"sessionId": "call-1", "callerId": "+254700000001"}),
        ))
        .await
        .unwrap();
    let body = json_body(voice).await;
    assert_eq!(body["message"], "Voice call processed successfully");
    assert_eq!(body["response"]["voice"]["getDigits"]["numDigits"], 1);

    let chat = app
        .oneshot(post_json(
            "/api/chat",
            json!({"sessionId": "chat-1", "userId": "u1", "message": "hello"}),
        ))
        .await
        .unwrap();
    let body = json_body(chat).await;
    assert_eq!(body["message"], "Chat message processed successfully");
    assert!(body["response"]["options"].as_array().is_some());
}

#[tokio::test]
async fn test_community_endpoints() {
    let (app, _) = app();
    let posted = app
        .clone()
        .oneshot(post_json(
            "/api/post-need",
            json!({"organization": "Red Cross", "need": "Drivers", "location": "Nairobi"}),
        ))
        .await
        .unwrap();
    let body = json_body(posted).await;
    assert_eq!(body["message"], "Volunteer need posted successfully");
    assert_eq!(body["postId"], "POST1");

    let joined = app
        .clone()
        .oneshot(post_json("/api/join-group", json!({"group": "diabetes-support"})))
        .await
        .unwrap();
    assert_eq!(json_body(joined).await["message"], "Joined group successfully");

    let empty = app
        .oneshot(post_json("/api/send-message", json!({"group": "diabetes-support", "message": ""})))
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
}
