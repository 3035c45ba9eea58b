//! End-to-end tests: questionnaire session against a live scoring service

use serde_json::{json, Value};
use tokio::net::TcpListener;

use mindcheck::client::PredictionClient;
use mindcheck::config::ApiConfig;
use mindcheck::predictor::RemotePredictor;
use mindcheck::session::{FormSession, SessionState};
use mindcheck::{server, SubmitError};

async fn spawn_service() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        server::serve_on(listener).await.unwrap();
    });
    format!("http://{}", addr)
}

fn remote_session(base_url: &str) -> FormSession {
    let api = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ApiConfig::default()
    };
    let client = PredictionClient::new(&api, false).unwrap();
    FormSession::new(Box::new(RemotePredictor::new(client)))
}

fn fill(session: &mut FormSession) {
    for (name, value) in [
        ("sleep_hours", "7"),
        ("academic_performance", "average"),
        ("bullied", "no"),
        ("has_close_friends", "yes"),
        ("homesick_level", "2"),
        ("mess_food_rating", "3"),
        ("sports_participation", "Yes"),
        ("social_activities", "5"),
        ("study_hours", "8"),
        ("screen_time", "3"),
    ] {
        assert!(session.form_mut().set(name, value));
    }
}

#[tokio::test]
async fn test_submit_render_and_reset() {
    let base = spawn_service().await;
    let mut session = remote_session(&base);
    fill(&mut session);

    let assessment = session.submit().await.unwrap();
    assert_eq!(assessment.condition, "Stress");

    let view = session.result_view().unwrap();
    let rendered = view.render();
    assert_eq!(rendered.matches("\n  - ").count(), assessment.recommendations.len());
    assert!(rendered.contains("Condition: Stress"));
    assert!(rendered.contains("Contributing Factors:"));
    assert!(rendered.contains("Important Note:"));

    session.reset();
    assert!(session.form().is_blank());
    assert_eq!(session.state(), &SessionState::Editing);
}

#[tokio::test]
async fn test_network_failure_keeps_answers() {
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let mut session = remote_session(&closed);
    fill(&mut session);
    let before = session.form().clone();

    let err = session.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Submission(_)));
    assert!(!err.user_message().is_empty());
    assert_eq!(session.form(), &before);
    assert!(session.result().is_none());
}

#[tokio::test]
async fn test_service_rejects_incomplete_body() {
    let base = spawn_service().await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/predict", base))
        .json(&json!({ "sleep_hours": 7 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Please fill in all fields"));
}

#[tokio::test]
async fn test_service_index_lists_endpoints() {
    let base = spawn_service().await;
    let body: Value = reqwest::get(format!("{}/", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["endpoints"]["predict"], "/api/predict");
    assert_eq!(body["endpoints"]["academic_options"], "/api/academic-options");
}

#[tokio::test]
async fn test_service_allows_cross_origin_requests() {
    let base = spawn_service().await;
    let response = reqwest::Client::new()
        .get(format!("{}/api/academic-options", base))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
