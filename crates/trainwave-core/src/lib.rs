// ABOUTME: Core types and constants for Trainwave pose-driven repetition tracking
// ABOUTME: Foundation crate with error handling, landmark/frame model, and exercise constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

#![deny(unsafe_code)]

//! # Trainwave Core
//!
//! Foundation crate providing shared types and constants for the Trainwave
//! repetition tracker. It changes rarely so the rest of the workspace can
//! compile incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Joint indices, hysteresis margins, capture defaults, env variable names
//! - **models**: Landmarks, frames, exercise kinds, phases, and persisted records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Landmark, Frame, ExerciseKind, Phase, ExerciseRecord)
pub mod models;
