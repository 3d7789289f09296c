// ABOUTME: HTTP exercise log client posting finished sessions to the exercise API
// ABOUTME: Single attempt per call with a request timeout; failures come back as AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::ExerciseLogger;
use crate::config::PersistenceConfig;
use crate::constants::persistence::SERVICE_NAME;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{ExerciseKind, ExerciseRecord};

/// Longest slice of an error body echoed into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct CreateExerciseRequest<'a> {
    exercise: &'a str,
    reps: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExerciseResponse {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    exercise: String,
    reps: u32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// Posts `{ "exercise": <label>, "reps": n }` to `{base_url}/api/exercises`
#[derive(Debug, Clone)]
pub struct HttpExerciseLogger {
    client: Client,
    endpoint: Url,
    api_token: Option<String>,
}

impl HttpExerciseLogger {
    /// Build a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the endpoint URL is unusable, or
    /// `ConfigError` if the HTTP client cannot be constructed.
    pub fn new(config: &PersistenceConfig) -> AppResult<Self> {
        let endpoint = config.exercises_endpoint()?;
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("cannot build HTTP client: {e}")).with_source(e))?;
        Ok(Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
        })
    }

    /// Full URL records are posted to
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ExerciseLogger for HttpExerciseLogger {
    async fn log_exercise(&self, exercise: ExerciseKind, reps: u32) -> AppResult<ExerciseRecord> {
        debug!(endpoint = %self.endpoint, exercise = %exercise, reps, "posting exercise log");

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .json(&CreateExerciseRequest {
                exercise: exercise.persistence_label(),
                reps,
            });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            AppError::external_unavailable(SERVICE_NAME, format!("request failed: {e}")).with_source(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("{SERVICE_NAME}: HTTP {status}"),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("HTTP {status}: {excerpt}"),
            ));
        }

        let body: ExerciseResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("unreadable response: {e}")).with_source(e)
        })?;

        let record = ExerciseRecord {
            id: body.id,
            // The backend echoes its label; fall back to what was sent.
            exercise: body.exercise.parse().unwrap_or(exercise),
            reps: body.reps,
            created_at: body.created_at.unwrap_or_else(Utc::now),
        };
        info!(record_id = %record.id, exercise = %record.exercise, reps = record.reps, "exercise logged");
        Ok(record)
    }
}
