// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Joint indices, hysteresis margins, capture defaults, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Body landmark layout produced by the pose engine (33 slots)
pub mod joints {
    /// Number of landmark slots in a frame
    pub const LANDMARK_COUNT: usize = 33;

    /// Nose
    pub const NOSE: usize = 0;
    /// Left shoulder
    pub const LEFT_SHOULDER: usize = 11;
    /// Right shoulder
    pub const RIGHT_SHOULDER: usize = 12;
    /// Left elbow
    pub const LEFT_ELBOW: usize = 13;
    /// Right elbow
    pub const RIGHT_ELBOW: usize = 14;
    /// Left wrist
    pub const LEFT_WRIST: usize = 15;
    /// Right wrist
    pub const RIGHT_WRIST: usize = 16;
    /// Left hip
    pub const LEFT_HIP: usize = 23;
    /// Right hip
    pub const RIGHT_HIP: usize = 24;
    /// Left knee
    pub const LEFT_KNEE: usize = 25;
    /// Right knee
    pub const RIGHT_KNEE: usize = 26;
}

/// Fixed pixel margins that separate each exercise's enter and exit conditions.
///
/// These were tuned by eye at 640x480 and are not normalized by body size, so
/// they shift with camera distance. They are kept exactly as tuned.
pub mod thresholds {
    /// Push-up: shoulder must rise this far above the elbow to disarm
    pub const PUSHUP_EXIT_MARGIN: f32 = 60.0;

    /// Pull-up / press: wrists within this distance below the shoulders arms the gate
    pub const OVERHEAD_ENTER_MARGIN: f32 = 50.0;
    /// Pull-up / press: wrists this far above the shoulders disarms the gate
    pub const OVERHEAD_EXIT_MARGIN: f32 = 200.0;

    /// Curl: wrists this far above the elbows arms the gate
    pub const CURL_ENTER_MARGIN: f32 = 50.0;
    /// Curl: wrists this far below the elbows disarms the gate
    pub const CURL_EXIT_MARGIN: f32 = 70.0;

    /// Shoulder raise: symmetric elbow-over-shoulder margin
    pub const SHOULDER_RAISE_MARGIN: f32 = 30.0;

    /// Squat: hip this far above the knee disarms the gate
    pub const SQUAT_EXIT_MARGIN: f32 = 50.0;

    /// Deadlift: knee this far above the wrist disarms the gate
    pub const DEADLIFT_EXIT_MARGIN: f32 = 70.0;
}

/// Capture surface defaults
pub mod capture {
    /// Default frame width in pixels
    pub const DEFAULT_FRAME_WIDTH: u32 = 640;
    /// Default frame height in pixels
    pub const DEFAULT_FRAME_HEIGHT: u32 = 480;
    /// Landmarks below this confidence are treated as missing
    pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;
    /// Frames in flight between a pushed source and its consumer
    pub const FRAME_CHANNEL_CAPACITY: usize = 1;
    /// Session commands (exercise switch, reset, stop) that may queue up
    pub const COMMAND_CHANNEL_CAPACITY: usize = 8;
}

/// Persistence collaborator defaults
pub mod persistence {
    /// Path of the exercise log endpoint, relative to the API base URL
    pub const EXERCISES_PATH: &str = "/api/exercises";
    /// Request timeout for the exercise log call
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Service name used in error messages
    pub const SERVICE_NAME: &str = "exercise-log";
}

/// Service identity used in logs
pub mod service_names {
    /// Default service name
    pub const TRAINWAVE: &str = "trainwave";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Capture width in pixels
    pub const FRAME_WIDTH: &str = "TRAINWAVE_FRAME_WIDTH";
    /// Capture height in pixels
    pub const FRAME_HEIGHT: &str = "TRAINWAVE_FRAME_HEIGHT";
    /// Minimum landmark confidence
    pub const MIN_CONFIDENCE: &str = "TRAINWAVE_MIN_CONFIDENCE";
    /// Exercise selected when a session starts without an explicit choice
    pub const DEFAULT_EXERCISE: &str = "TRAINWAVE_DEFAULT_EXERCISE";
    /// Base URL of the exercise log API; unset disables persistence
    pub const API_BASE_URL: &str = "TRAINWAVE_API_BASE_URL";
    /// Bearer token for the exercise log API
    pub const API_TOKEN: &str = "TRAINWAVE_API_TOKEN";
    /// Request timeout for the exercise log API
    pub const API_TIMEOUT_SECS: &str = "TRAINWAVE_API_TIMEOUT_SECS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}
