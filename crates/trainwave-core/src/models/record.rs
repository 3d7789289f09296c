// ABOUTME: Persisted exercise log entry returned by the persistence collaborator
// ABOUTME: One record per stopped session with at least one repetition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::ExerciseKind;

/// A stored session result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Identifier assigned by the store
    pub id: String,
    /// Exercise that was tracked
    pub exercise: ExerciseKind,
    /// Final repetition count
    pub reps: u32,
    /// When the store accepted the record
    pub created_at: DateTime<Utc>,
}

impl ExerciseRecord {
    /// Record with a freshly generated id and the current time
    #[must_use]
    pub fn new(exercise: ExerciseKind, reps: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            exercise,
            reps,
            created_at: Utc::now(),
        }
    }
}
