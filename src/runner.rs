// ABOUTME: Async session runner consuming one frame subscription and a control channel
// ABOUTME: Sequences exercise switches and resets between frames and reports the final count once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

//! # Session Runner
//!
//! One task owns the [`Session`]. Frames and control commands are handled
//! strictly one at a time, so a reset or exercise switch always lands between
//! two frame evaluations and never interleaves with one. Pending commands win
//! over pending frames.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::constants::capture::COMMAND_CHANNEL_CAPACITY;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::frame_source::Subscription;
use crate::models::{ExerciseKind, ExerciseRecord};
use crate::persistence::ExerciseLogger;
use crate::tracking::{Session, SessionSummary};

/// Control messages accepted while a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Switch exercise; the count restarts from zero
    SelectExercise(ExerciseKind),
    /// Restart the count for the current exercise
    Reset,
    /// End the session and report the count
    Stop,
}

/// Why the run loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A [`SessionCommand::Stop`] arrived
    Requested,
    /// The subscription was cancelled
    Cancelled,
    /// The frame source ran dry
    SourceEnded,
}

/// What happened to the final count
#[derive(Debug)]
pub enum PersistOutcome {
    /// The exercise log accepted the record
    Persisted(ExerciseRecord),
    /// Nothing to persist: zero reps, or no logger attached
    Skipped,
    /// The exercise log rejected the record or could not be reached
    Failed(AppError),
}

impl PersistOutcome {
    /// Whether a record was written
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}

/// Final result of a run
#[derive(Debug)]
pub struct SessionOutcome {
    /// Final figures of the session
    pub summary: SessionSummary,
    /// Fate of the final count
    pub persistence: PersistOutcome,
    /// Why the session ended
    pub reason: StopReason,
}

/// Cloneable control handle for a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Switch the running session to `exercise`
    ///
    /// # Errors
    ///
    /// Returns `SessionAlreadyStopped` once the runner has finished.
    pub async fn select_exercise(&self, exercise: ExerciseKind) -> AppResult<()> {
        self.send(SessionCommand::SelectExercise(exercise)).await
    }

    /// Restart the running session's count
    ///
    /// # Errors
    ///
    /// Returns `SessionAlreadyStopped` once the runner has finished.
    pub async fn reset(&self) -> AppResult<()> {
        self.send(SessionCommand::Reset).await
    }

    /// Ask the runner to stop and report
    ///
    /// # Errors
    ///
    /// Returns `SessionAlreadyStopped` once the runner has finished.
    pub async fn stop(&self) -> AppResult<()> {
        self.send(SessionCommand::Stop).await
    }

    /// Whether the runner has finished
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.commands.is_closed()
    }

    async fn send(&self, command: SessionCommand) -> AppResult<()> {
        self.commands.send(command).await.map_err(|_| {
            AppError::new(
                ErrorCode::SessionAlreadyStopped,
                "session runner has already finished",
            )
        })
    }
}

/// Drives one [`Session`] from one [`Subscription`]
pub struct SessionRunner {
    session: Session,
    commands: mpsc::Receiver<SessionCommand>,
    logger: Option<Arc<dyn ExerciseLogger>>,
}

impl SessionRunner {
    /// Runner for `session` plus the handle that controls it
    #[must_use]
    pub fn new(session: Session) -> (Self, SessionHandle) {
        let (sender, receiver) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let runner = Self {
            session,
            commands: receiver,
            logger: None,
        };
        (runner, SessionHandle { commands: sender })
    }

    /// Exercise log that receives the final count
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn ExerciseLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Consume frames until stopped, cancelled, or the source ends.
    ///
    /// Dropping every [`SessionHandle`] does not stop the run; it continues
    /// until the frame source ends or is cancelled.
    ///
    /// # Errors
    ///
    /// Returns `SessionAlreadyStopped` if the session was stopped before the
    /// runner got it. Persistence failures are not errors; they come back as
    /// [`PersistOutcome::Failed`].
    pub async fn run(mut self, mut frames: Subscription) -> AppResult<SessionOutcome> {
        let session_id = self.session.id();
        debug!(session_id = %session_id, "session runner started");
        let cancel = frames.cancel_handle();
        let mut commands_open = true;

        let reason = loop {
            tokio::select! {
                biased;
                command = self.commands.recv(), if commands_open => match command {
                    Some(SessionCommand::Stop) => break StopReason::Requested,
                    Some(SessionCommand::Reset) => self.session.reset()?,
                    Some(SessionCommand::SelectExercise(exercise)) => {
                        self.session.select_exercise(exercise)?;
                    }
                    None => {
                        debug!(session_id = %session_id, "all session handles dropped");
                        commands_open = false;
                    }
                },
                frame = frames.next() => match frame {
                    Some(frame) => {
                        self.session.on_frame(&frame);
                    }
                    None if cancel.is_cancelled() => break StopReason::Cancelled,
                    None => break StopReason::SourceEnded,
                },
            }
        };

        frames.cancel();
        self.commands.close();
        let summary = self.session.stop()?;
        info!(
            session_id = %session_id,
            reason = ?reason,
            reps = summary.rep_count,
            "session runner finished"
        );

        let persistence = persist(self.logger.as_deref(), &summary).await;
        Ok(SessionOutcome {
            summary,
            persistence,
            reason,
        })
    }
}

async fn persist(logger: Option<&dyn ExerciseLogger>, summary: &SessionSummary) -> PersistOutcome {
    if !summary.should_persist() {
        debug!(session_id = %summary.session_id, "no repetitions; nothing to persist");
        return PersistOutcome::Skipped;
    }
    let Some(logger) = logger else {
        debug!(session_id = %summary.session_id, "no exercise logger attached");
        return PersistOutcome::Skipped;
    };
    match logger.log_exercise(summary.exercise, summary.rep_count).await {
        Ok(record) => PersistOutcome::Persisted(record),
        Err(e) => {
            warn!(
                session_id = %summary.session_id,
                exercise = %summary.exercise,
                reps = summary.rep_count,
                error = %e,
                "failed to persist exercise"
            );
            PersistOutcome::Failed(e)
        }
    }
}

impl std::fmt::Debug for SessionRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRunner")
            .field("session", &self.session)
            .field("has_logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}
