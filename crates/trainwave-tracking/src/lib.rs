// ABOUTME: Repetition tracking engine for pose landmark streams
// ABOUTME: Turns per-frame keypoints into de-duplicated repetition counts per exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

#![deny(unsafe_code)]

//! # Trainwave Tracking
//!
//! Three layers, leaf first:
//!
//! - **evaluator**: one pair of threshold predicates per [`ExerciseKind`],
//!   evaluated against a single frame and the current gate state
//! - **tracker**: holds phase, gate, and count, and applies at most one
//!   transition per frame
//! - **session**: owns a tracker for the lifetime of a tracking session,
//!   notifies observers, and produces the final summary exactly once
//!
//! Nothing here blocks, allocates per frame, or returns an error from the
//! frame path. Malformed frames are no-ops.
//!
//! [`ExerciseKind`]: trainwave_core::models::ExerciseKind

/// Per-exercise enter/exit predicates
pub mod evaluator;

/// UI-facing change notifications
pub mod observer;

/// Session-level accumulator around a tracker
pub mod session;

/// Phase/gate/count state machine
pub mod tracker;

pub use evaluator::{evaluate, required_joints, Evaluation, Transition};
pub use observer::{NoopObserver, SessionEvent, SessionObserver};
pub use session::{Session, SessionError, SessionSummary};
pub use tracker::{FrameOutcome, Tracker, TrackerState};
