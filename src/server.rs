//! Scoring service
//!
//! Serves the prediction contract the client talks to:
//! - `POST /api/predict` classifies an answer set
//! - `GET /api/academic-options` lists the academic performance options
//! - `GET /` describes the service
//!
//! Both request encodings are accepted field by field, so clients sending
//! labels and clients sending integer codes get the same answer.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Map, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::errors::Result;
use crate::form::answers::yes_no_label;
use crate::form::{AcademicPerformance, Answers, FieldKind, FormState, FIELDS};
use crate::scoring::classify;
use crate::wire::PredictResponse;

/// Build the service router
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(index))
        .route("/api/academic-options", get(academic_options))
        .route("/api/predict", post(predict))
        .layer(cors)
}

/// Bind and serve until the process is stopped
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener).await
}

/// Serve on an already bound listener
pub async fn serve_on(listener: TcpListener) -> Result<()> {
    tracing::info!("-- Starting scoring service on {}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Mental Health Assessment API is running",
        "endpoints": {
            "predict": "/api/predict",
            "academic_options": "/api/academic-options"
        }
    }))
}

async fn academic_options() -> Json<Vec<String>> {
    Json(AcademicPerformance::default_options())
}

async fn predict(body: std::result::Result<Json<Value>, JsonRejection>) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let answers = match decode_answers(&body) {
        Ok(answers) => answers,
        Err(message) => return bad_request(message),
    };

    let condition = classify(&answers);
    tracing::info!(condition = %condition, "prediction served");

    Json(PredictResponse {
        condition: Some(condition.label().to_string()),
        recommendation: Some(condition.recommendation().to_string()),
        ..PredictResponse::default()
    })
    .into_response()
}

fn bad_request(message: String) -> Response {
    tracing::warn!(%message, "rejected prediction request");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Decode a request body in either encoding and validate it
pub fn decode_answers(body: &Value) -> std::result::Result<Answers, String> {
    let object: &Map<String, Value> = body
        .as_object()
        .ok_or_else(|| "request body must be a JSON object".to_string())?;

    let mut form = FormState::new();
    for spec in FIELDS.iter() {
        let raw = match object.get(spec.name) {
            None | Some(Value::Null) => String::new(),
            Some(value) => field_text(spec.kind, value)
                .ok_or_else(|| format!("{} has an unsupported value: {}", spec.name, value))?,
        };
        form.set(spec.name, raw);
    }

    form.validate().map_err(|e| e.message())
}

/// Normalise one wire value to the text the form would hold
fn field_text(kind: FieldKind, value: &Value) -> Option<String> {
    match (kind, value) {
        (_, Value::String(s)) => Some(s.clone()),
        (FieldKind::Integer { .. }, Value::Number(n)) => n.as_i64().map(|v| v.to_string()),
        (FieldKind::Academic, Value::Number(n)) => n
            .as_i64()
            .and_then(AcademicPerformance::from_code)
            .map(|a| a.label().to_string()),
        (FieldKind::YesNo, Value::Bool(b)) => Some(yes_no_label(*b).to_string()),
        (FieldKind::YesNo, Value::Number(n)) => match n.as_i64() {
            Some(0) => Some("No".to_string()),
            Some(1) => Some("Yes".to_string()),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_labels() {
        let body = json!({
            "sleep_hours": 7, "academic_performance": "Average", "bullied": "No",
            "has_close_friends": "Yes", "homesick_level": 2, "mess_food_rating": 3,
            "sports_participation": "Yes", "social_activities": 5, "study_hours": 4,
            "screen_time": 3
        });
        let answers = decode_answers(&body).unwrap();
        assert_eq!(answers.academic_performance, AcademicPerformance::Average);
        assert!(answers.has_close_friends);
    }

    #[test]
    fn test_decode_codes_and_numeric_strings() {
        let body = json!({
            "sleep_hours": "7", "academic_performance": 1, "bullied": 0,
            "has_close_friends": true, "homesick_level": 2, "mess_food_rating": 3,
            "sports_participation": 1, "social_activities": 5, "study_hours": 4,
            "screen_time": 3
        });
        let answers = decode_answers(&body).unwrap();
        assert_eq!(answers.sleep_hours, 7);
        assert_eq!(answers.academic_performance, AcademicPerformance::Average);
        assert!(!answers.bullied);
        assert!(answers.sports_participation);
    }

    #[test]
    fn test_decode_missing_field() {
        let body = json!({ "sleep_hours": 7 });
        let err = decode_answers(&body).unwrap_err();
        assert!(err.contains("Please fill in all fields"));
    }

    #[test]
    fn test_decode_rejects_bad_code() {
        let body = json!({
            "sleep_hours": 7, "academic_performance": 7, "bullied": 0,
            "has_close_friends": 1, "homesick_level": 2, "mess_food_rating": 3,
            "sports_participation": 1, "social_activities": 5, "study_hours": 4,
            "screen_time": 3
        });
        assert!(decode_answers(&body).unwrap_err().contains("academic_performance"));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(decode_answers(&json!([1, 2, 3])).is_err());
    }
}
