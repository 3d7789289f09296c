// ABOUTME: In-memory exercise log for tests and dry-run replays
// ABOUTME: Records are kept in insertion order behind an async mutex
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::ExerciseLogger;
use crate::errors::AppResult;
use crate::models::{ExerciseKind, ExerciseRecord};

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct InMemoryExerciseLogger {
    records: Mutex<Vec<ExerciseRecord>>,
}

impl InMemoryExerciseLogger {
    /// Empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far, oldest first
    pub async fn records(&self) -> Vec<ExerciseRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl ExerciseLogger for InMemoryExerciseLogger {
    async fn log_exercise(&self, exercise: ExerciseKind, reps: u32) -> AppResult<ExerciseRecord> {
        let record = ExerciseRecord::new(exercise, reps);
        debug!(record_id = %record.id, exercise = %exercise, reps, "exercise logged in memory");
        self.records.lock().await.push(record.clone());
        Ok(record)
    }
}
