// ABOUTME: Integration tests for the HTTP exercise log client against a wiremock backend
// ABOUTME: Verifies request shape, auth header, response parsing, and error classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

#![cfg(feature = "http-persistence")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use serde_json::json;
use tokio::net::TcpListener;
use trainwave::config::PersistenceConfig;
use trainwave::errors::ErrorCode;
use trainwave::models::ExerciseKind;
use trainwave::persistence::{ExerciseLogger, HttpExerciseLogger};
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn logger_for(server: &MockServer, token: Option<&str>) -> HttpExerciseLogger {
    let mut config = PersistenceConfig::new(Url::parse(&server.uri()).unwrap());
    config.api_token = token.map(str::to_owned);
    config.timeout = Duration::from_secs(5);
    HttpExerciseLogger::new(&config).unwrap()
}

#[tokio::test]
async fn test_posts_label_and_reps_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/exercises"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({"exercise": "Squats", "reps": 12})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "65f0c0ffee",
            "exercise": "Squats",
            "reps": 12,
            "createdAt": "2025-03-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let logger = logger_for(&server, Some("tok-123"));
    assert!(logger.endpoint().as_str().ends_with("/api/exercises"));

    let record = logger.log_exercise(ExerciseKind::Squat, 12).await.unwrap();

    assert_eq!(record.id, "65f0c0ffee");
    assert_eq!(record.exercise, ExerciseKind::Squat);
    assert_eq!(record.reps, 12);
    assert_eq!(record.created_at.to_rfc3339(), "2025-03-01T10:00:00+00:00");
}

#[tokio::test]
async fn test_anonymous_request_and_sparse_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/exercises"))
        .and(body_json(json!({"exercise": "Curls", "reps": 7})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "abc", "exercise": "Curls", "reps": 7})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let record = logger_for(&server, None)
        .log_exercise(ExerciseKind::BicepCurl, 7)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert_eq!(record.id, "abc");
    assert_eq!(record.exercise, ExerciseKind::BicepCurl);
}

#[tokio::test]
async fn test_server_error_is_external_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/exercises"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = logger_for(&server, None)
        .log_exercise(ExerciseKind::Press, 3)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("500"));
    assert!(err.message.contains("db down"));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_rejected_token_is_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/exercises"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let err = logger_for(&server, Some("expired"))
        .log_exercise(ExerciseKind::PullUp, 4)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_unreachable_backend_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
    drop(listener);

    let mut config = PersistenceConfig::new(url);
    config.timeout = Duration::from_secs(5);
    let err = HttpExerciseLogger::new(&config)
        .unwrap()
        .log_exercise(ExerciseKind::Deadlift, 1)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(err.is_transient());
}
