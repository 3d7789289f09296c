// ABOUTME: Configuration module for capture, tracking, and persistence settings
// ABOUTME: Re-exports the environment-driven configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

/// Environment variable parsing and validation
pub mod environment;

pub use environment::{CaptureConfig, Environment, PersistenceConfig, TrainwaveConfig};
