// ABOUTME: Main library entry point for Trainwave repetition tracking
// ABOUTME: Wires frame sources, tracking sessions, persistence, config, and logging together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

#![deny(unsafe_code)]

//! # Trainwave
//!
//! Turns a live stream of body landmarks into repetition counts for a chosen
//! exercise, then hands the final count to an exercise log.
//!
//! ## Architecture
//!
//! - **Frame sources**: push (channel) or replay (JSON lines) producers of frames
//! - **Tracking**: per-exercise evaluator, tracker state machine, session accumulator
//!   (re-exported from `trainwave-tracking`)
//! - **Runner**: drives one session from one frame source, sequencing exercise
//!   switches between frames, and reports the final count once
//! - **Persistence**: exercise log collaborator (HTTP or in-memory)
//! - **Config / logging**: environment-driven configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trainwave::frame_source::{ChannelFrameSource, FrameSource};
//! use trainwave::models::ExerciseKind;
//! use trainwave::runner::SessionRunner;
//! use trainwave::tracking::Session;
//!
//! #[tokio::main]
//! async fn main() -> trainwave::errors::AppResult<()> {
//!     let (_sender, source) = ChannelFrameSource::new();
//!     let (runner, handle) = SessionRunner::new(Session::start(ExerciseKind::Squat));
//!     let task = tokio::spawn(runner.run(source.subscribe()));
//!
//!     // ... push frames through `_sender` from the pose engine ...
//!
//!     handle.stop().await?;
//!     let outcome = task.await.map_err(|e| trainwave::errors::AppError::internal(e.to_string()))??;
//!     println!("{} reps", outcome.summary.rep_count);
//!     Ok(())
//! }
//! ```

pub use trainwave_core::{constants, errors, models};
pub use trainwave_tracking as tracking;

/// Environment-driven configuration
pub mod config;

/// Frame source interface and implementations
pub mod frame_source;

/// Structured logging setup
pub mod logging;

/// Exercise log collaborator
pub mod persistence;

/// Async driver binding one session to one frame source
pub mod runner;
