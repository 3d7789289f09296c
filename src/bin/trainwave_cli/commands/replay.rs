// ABOUTME: Recording replay command for trainwave-cli
// ABOUTME: Streams a JSON-lines recording through a session runner and reports the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use trainwave::{
    config::{CaptureConfig, TrainwaveConfig},
    errors::{AppError, AppResult},
    frame_source::{FrameSource, JsonLinesFrameSource},
    logging::TrackingLogger,
    models::ExerciseKind,
    persistence::ExerciseLogger,
    runner::{PersistOutcome, SessionRunner},
    tracking::Session,
};

use crate::helpers::display::{display_event, display_outcome};

/// Flags of the `replay` subcommand
pub struct ReplayOptions {
    pub input: PathBuf,
    pub exercise: Option<ExerciseKind>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub min_confidence: Option<f32>,
    pub save: bool,
}

/// Replay a recording and report the count
pub async fn run(config: &TrainwaveConfig, options: &ReplayOptions) -> AppResult<()> {
    let capture = CaptureConfig {
        frame_width: options.width.unwrap_or(config.capture.frame_width),
        frame_height: options.height.unwrap_or(config.capture.frame_height),
        min_confidence: options
            .min_confidence
            .unwrap_or(config.capture.min_confidence),
    };
    capture.validate()?;

    let exercise = options.exercise.unwrap_or(config.default_exercise);
    info!(
        input = %options.input.display(),
        exercise = %exercise,
        "Replaying recording"
    );

    let source =
        JsonLinesFrameSource::open(&options.input, capture.frame_width, capture.frame_height)
            .await?;
    let subscription = source.subscribe();

    let cancel = subscription.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; stopping replay");
            cancel.cancel();
        }
    });

    let session = Session::start(exercise)
        .with_min_confidence(capture.min_confidence)
        .with_observer(display_event);
    let (runner, _handle) = SessionRunner::new(session);
    let runner = if options.save {
        runner.with_logger(build_logger(config)?)
    } else {
        runner
    };

    let outcome = runner.run(subscription).await?;
    TrackingLogger::log_session_summary(&outcome.summary);
    display_outcome(&outcome);

    match outcome.persistence {
        PersistOutcome::Failed(e) => Err(e),
        PersistOutcome::Persisted(_) | PersistOutcome::Skipped => Ok(()),
    }
}

#[cfg(feature = "http-persistence")]
fn build_logger(config: &TrainwaveConfig) -> AppResult<Arc<dyn ExerciseLogger>> {
    use trainwave::persistence::HttpExerciseLogger;

    let persistence = config.persistence.as_ref().ok_or_else(|| {
        AppError::config("--save needs TRAINWAVE_API_BASE_URL to be set")
    })?;
    Ok(Arc::new(HttpExerciseLogger::new(persistence)?))
}

#[cfg(not(feature = "http-persistence"))]
fn build_logger(_config: &TrainwaveConfig) -> AppResult<Arc<dyn ExerciseLogger>> {
    Err(AppError::config(
        "--save needs a build with the http-persistence feature",
    ))
}
