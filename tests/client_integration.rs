//! Integration tests for the prediction client
//!
//! Runs the scoring service (or a scripted stand-in) on an ephemeral port and
//! talks to it over real HTTP.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use mindcheck::assessment::AssessmentSource;
use mindcheck::client::PredictionClient;
use mindcheck::config::{ApiConfig, Config};
use mindcheck::form::{AcademicPerformance, Answers};
use mindcheck::telemetry::TelemetryCollector;
use mindcheck::wire::Encoding;
use mindcheck::{server, SubmissionError};

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Address nothing is listening on
fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Router whose predict route always answers with `status`, counting hits
fn scripted(status: StatusCode, hits: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/api/predict",
        post(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (status, Json(json!({ "error": "'sleep_hours'" })))
            }
        }),
    )
}

fn api(base_url: &str, backups: Vec<String>) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        backup_urls: backups,
        timeout_secs: 5,
        ..ApiConfig::default()
    }
}

fn answers() -> Answers {
    Answers {
        sleep_hours: 7,
        academic_performance: AcademicPerformance::Average,
        bullied: false,
        has_close_friends: true,
        homesick_level: 2,
        mess_food_rating: 3,
        sports_participation: true,
        social_activities: 5,
        study_hours: 4,
        screen_time: 3,
    }
}

#[tokio::test]
async fn test_predict_with_label_encoding() {
    let base = spawn(server::router()).await;
    let client = PredictionClient::new(&api(&base, vec![]), false).unwrap();

    let assessment = client.predict(&answers()).await.unwrap();

    assert_eq!(assessment.condition, "Normal");
    assert!(!assessment.recommendations.is_empty());
    assert_eq!(assessment.source, AssessmentSource::Remote(base));
}

#[tokio::test]
async fn test_predict_with_code_encoding() {
    let base = spawn(server::router()).await;
    let mut config = api(&base, vec![]);
    config.encoding = Encoding::Codes;
    let client = PredictionClient::new(&config, false).unwrap();

    let depressed = Answers {
        sleep_hours: 5,
        screen_time: 7,
        ..answers()
    };
    let assessment = client.predict(&depressed).await.unwrap();

    assert_eq!(assessment.condition, "Depression");
    assert!(assessment.recommendations.len() > 1);
}

#[tokio::test]
async fn test_unreachable_primary_falls_back_to_backup() {
    let backup = spawn(server::router()).await;
    let telemetry = TelemetryCollector::new();
    let client = PredictionClient::new(&api(&closed_url(), vec![backup.clone()]), false)
        .unwrap()
        .with_telemetry(telemetry.clone());

    let assessment = client.predict(&answers()).await.unwrap();

    assert_eq!(assessment.source, AssessmentSource::Remote(backup));
    let stats = telemetry.get_stats();
    assert_eq!(stats.attempts, 2);
    assert_eq!(stats.attempts_failed, 1);
    assert_eq!(stats.fallbacks, 1);
}

#[tokio::test]
async fn test_https_primary_downgrades_to_plain_http() {
    let plain = spawn(server::router()).await;
    let secure = plain.replacen("http://", "https://", 1);
    let telemetry = TelemetryCollector::new();
    let client = PredictionClient::new(&api(&secure, vec![]), true)
        .unwrap()
        .with_telemetry(telemetry.clone());

    let assessment = client.predict(&answers()).await.unwrap();

    assert_eq!(assessment.source, AssessmentSource::Remote(plain));
    let stats = telemetry.get_stats();
    assert_eq!(stats.attempts, 2);
    assert_eq!(stats.fallbacks, 1);
}

#[tokio::test]
async fn test_mobile_user_agent_enables_downgrade() {
    let plain = spawn(server::router()).await;
    let mut config = Config::default();
    config.api = api(&plain.replacen("http://", "https://", 1), vec![]);
    config.api.user_agent =
        Some("Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36".to_string());
    assert!(config.downgrade_enabled());

    let telemetry = TelemetryCollector::new();
    let client = PredictionClient::from_config(&config)
        .unwrap()
        .with_telemetry(telemetry.clone());
    let assessment = client.predict(&answers()).await.unwrap();

    assert_eq!(assessment.source, AssessmentSource::Remote(plain));
    assert_eq!(telemetry.get_stats().fallbacks, 1);
}

#[tokio::test]
async fn test_bad_request_is_not_retried() {
    let primary_hits = Arc::new(AtomicUsize::new(0));
    let backup_hits = Arc::new(AtomicUsize::new(0));
    let primary = spawn(scripted(StatusCode::BAD_REQUEST, primary_hits.clone())).await;
    let backup = spawn(scripted(StatusCode::OK, backup_hits.clone())).await;

    let client = PredictionClient::new(&api(&primary, vec![backup]), false).unwrap();
    let err = client.predict(&answers()).await.unwrap_err();

    assert_eq!(err, SubmissionError::BadRequest("'sleep_hours'".to_string()));
    assert_eq!(primary_hits.load(Ordering::SeqCst), 1);
    assert_eq!(backup_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_server_fault_is_classified_and_surfaced_last() {
    let hits = Arc::new(AtomicUsize::new(0));
    let primary = spawn(scripted(StatusCode::INTERNAL_SERVER_ERROR, hits.clone())).await;
    let backup = spawn(scripted(StatusCode::SERVICE_UNAVAILABLE, hits.clone())).await;

    let client = PredictionClient::new(&api(&primary, vec![backup]), false).unwrap();
    let err = client.predict(&answers()).await.unwrap_err();

    assert_eq!(err, SubmissionError::ServerFault { status: 503 });
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(!err.user_message().is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_offline() {
    let client = PredictionClient::new(&api(&closed_url(), vec![]), false).unwrap();
    let err = client.predict(&answers()).await.unwrap_err();

    assert_eq!(err, SubmissionError::Offline);
    assert!(err.user_message().contains("Unable to connect"));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let slow = Router::new().route(
        "/api/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "condition": "Normal" }))
        }),
    );
    let base = spawn(slow).await;
    let mut config = api(&base, vec![]);
    config.timeout_secs = 1;
    let client = PredictionClient::new(&config, false).unwrap();

    let err = client.predict(&answers()).await.unwrap_err();
    assert_eq!(err, SubmissionError::Timeout);
}

#[tokio::test]
async fn test_academic_options_fetch() {
    let base = spawn(server::router()).await;
    let client = PredictionClient::new(&api(&base, vec![]), false).unwrap();

    let options = client.academic_options().await.unwrap();
    assert_eq!(options, vec!["Poor", "Average", "Good"]);
}

#[tokio::test]
async fn test_probe_reports_reachability() {
    let base = spawn(server::router()).await;
    let client = PredictionClient::new(&api(&base, vec![]), false).unwrap();

    assert!(client.probe(&base).await.is_ok());
    assert_eq!(client.probe(&closed_url()).await, Err(SubmissionError::Offline));
}
