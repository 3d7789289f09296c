// ABOUTME: Shared test utilities for tracking integration tests
// ABOUTME: Builds pixel-space frames and canned poses for every supported exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `trainwave`

use std::sync::Once;

use trainwave::models::{ExerciseKind, Frame, JointIndex, Landmark};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Frame with the given joints at pixel height `y` (x fixed mid-frame)
pub fn frame(points: &[(JointIndex, f32)]) -> Frame {
    Frame::from_landmarks(
        0,
        points
            .iter()
            .map(|&(joint, y)| (joint, Landmark::new(320.0, y).with_confidence(0.9))),
    )
}

/// Frame whose landmarks all carry `confidence`
pub fn frame_with_confidence(points: &[(JointIndex, f32)], confidence: f32) -> Frame {
    Frame::from_landmarks(
        0,
        points
            .iter()
            .map(|&(joint, y)| (joint, Landmark::new(320.0, y).with_confidence(confidence))),
    )
}

/// Both shoulders at `shoulders`, both wrists at `wrists`
fn overhead(shoulders: f32, wrists: f32) -> Frame {
    frame(&[
        (JointIndex::LEFT_SHOULDER, shoulders),
        (JointIndex::RIGHT_SHOULDER, shoulders),
        (JointIndex::LEFT_WRIST, wrists),
        (JointIndex::RIGHT_WRIST, wrists),
    ])
}

/// Both elbows at `elbows`, both wrists at `wrists`
fn arms(elbows: f32, wrists: f32) -> Frame {
    frame(&[
        (JointIndex::LEFT_ELBOW, elbows),
        (JointIndex::RIGHT_ELBOW, elbows),
        (JointIndex::LEFT_WRIST, wrists),
        (JointIndex::RIGHT_WRIST, wrists),
    ])
}

/// Both shoulders at `shoulders`, both elbows at `elbows`
fn raise(shoulders: f32, elbows: f32) -> Frame {
    frame(&[
        (JointIndex::LEFT_SHOULDER, shoulders),
        (JointIndex::RIGHT_SHOULDER, shoulders),
        (JointIndex::LEFT_ELBOW, elbows),
        (JointIndex::RIGHT_ELBOW, elbows),
    ])
}

/// Frame satisfying the arming (enter) condition of `kind`
pub fn enter_pose(kind: ExerciseKind) -> Frame {
    match kind {
        ExerciseKind::PushUp => frame(&[
            (JointIndex::RIGHT_SHOULDER, 200.0),
            (JointIndex::RIGHT_ELBOW, 300.0),
        ]),
        ExerciseKind::PullUp | ExerciseKind::Press => overhead(200.0, 300.0),
        ExerciseKind::BicepCurl => arms(300.0, 200.0),
        ExerciseKind::ShoulderRaise => raise(300.0, 250.0),
        ExerciseKind::Squat => frame(&[
            (JointIndex::RIGHT_HIP, 400.0),
            (JointIndex::RIGHT_KNEE, 350.0),
        ]),
        ExerciseKind::Deadlift => frame(&[
            (JointIndex::LEFT_WRIST, 300.0),
            (JointIndex::LEFT_KNEE, 400.0),
        ]),
    }
}

/// Frame satisfying the disarming (exit) condition of `kind` but not its enter one
pub fn exit_pose(kind: ExerciseKind) -> Frame {
    match kind {
        ExerciseKind::PushUp => frame(&[
            (JointIndex::RIGHT_SHOULDER, 300.0),
            (JointIndex::RIGHT_ELBOW, 200.0),
        ]),
        ExerciseKind::PullUp | ExerciseKind::Press => overhead(300.0, 50.0),
        ExerciseKind::BicepCurl => arms(300.0, 400.0),
        ExerciseKind::ShoulderRaise => raise(300.0, 350.0),
        ExerciseKind::Squat => frame(&[
            (JointIndex::RIGHT_HIP, 250.0),
            (JointIndex::RIGHT_KNEE, 350.0),
        ]),
        ExerciseKind::Deadlift => frame(&[
            (JointIndex::LEFT_WRIST, 500.0),
            (JointIndex::LEFT_KNEE, 400.0),
        ]),
    }
}

/// `reps` full enter/exit cycles of `kind`
pub fn cycles(kind: ExerciseKind, reps: usize) -> Vec<Frame> {
    (0..reps)
        .flat_map(|_| [enter_pose(kind), exit_pose(kind)])
        .collect()
}

/// One replay line with normalized `(slot, x, y, visibility)` landmarks;
/// slots not listed are filled with low-visibility placeholders
pub fn recorded_line(timestamp_ms: u64, points: &[(usize, f32, f32, f32)]) -> String {
    let highest = points.iter().map(|p| p.0).max().unwrap_or(0);
    let landmarks: Vec<serde_json::Value> = (0..=highest)
        .map(|slot| {
            points.iter().find(|p| p.0 == slot).map_or_else(
                || serde_json::json!({"x": 0.0, "y": 0.0, "visibility": 0.0}),
                |&(_, x, y, visibility)| serde_json::json!({"x": x, "y": y, "visibility": visibility}),
            )
        })
        .collect();
    serde_json::json!({"timestamp_ms": timestamp_ms, "landmarks": landmarks}).to_string()
}
