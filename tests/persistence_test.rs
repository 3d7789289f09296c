// ABOUTME: Integration tests for the in-memory exercise log
// ABOUTME: Checks record contents, ordering, and trait-object use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use trainwave::models::ExerciseKind;
use trainwave::persistence::{ExerciseLogger, InMemoryExerciseLogger};

#[tokio::test]
async fn test_records_are_kept_in_order() {
    let logger = InMemoryExerciseLogger::new();
    let first = logger.log_exercise(ExerciseKind::PushUp, 12).await.unwrap();
    let second = logger.log_exercise(ExerciseKind::Squat, 20).await.unwrap();

    assert_ne!(first.id, second.id);
    let records = logger.records().await;
    assert_eq!(records, vec![first, second]);
}

#[tokio::test]
async fn test_logger_is_usable_as_trait_object() {
    let logger: std::sync::Arc<dyn ExerciseLogger> =
        std::sync::Arc::new(InMemoryExerciseLogger::new());
    let record = logger.log_exercise(ExerciseKind::Deadlift, 5).await.unwrap();
    assert_eq!(record.exercise, ExerciseKind::Deadlift);
    assert_eq!(record.reps, 5);
}
