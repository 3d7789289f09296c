// ABOUTME: Exercise log collaborator that receives a session's final count
// ABOUTME: Defines the ExerciseLogger trait with HTTP and in-memory implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

//! # Exercise Log
//!
//! A stopped session with at least one repetition is reported here once.
//! Implementations must not retry on their own; a failure is handed back to
//! the caller, who still holds the count.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{ExerciseKind, ExerciseRecord};

/// HTTP exercise log backend
#[cfg(feature = "http-persistence")]
pub mod http;

/// In-memory exercise log
pub mod memory;

#[cfg(feature = "http-persistence")]
pub use http::HttpExerciseLogger;
pub use memory::InMemoryExerciseLogger;

/// Destination for finished sessions
#[async_trait]
pub trait ExerciseLogger: Send + Sync {
    /// Store `reps` repetitions of `exercise`
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be stored.
    async fn log_exercise(&self, exercise: ExerciseKind, reps: u32) -> AppResult<ExerciseRecord>;
}
