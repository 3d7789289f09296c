// ABOUTME: Session accumulator owning one tracker for the lifetime of a tracking session
// ABOUTME: Notifies observers on change and yields the final summary exactly once on stop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use trainwave_core::errors::{AppError, ErrorCode};
use trainwave_core::models::{ExerciseKind, Frame, Phase};
use uuid::Uuid;

use crate::evaluator::Evaluation;
use crate::observer::{NoopObserver, SessionObserver};
use crate::tracker::{FrameOutcome, Tracker, TrackerState};

/// Errors raised by session control calls (never by the frame path)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The session was already stopped; its count has been reported
    #[error("session {0} has already been stopped")]
    AlreadyStopped(Uuid),
}

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        Self::new(ErrorCode::SessionAlreadyStopped, error.to_string())
    }
}

/// Final figures of a stopped session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Session identifier
    pub session_id: Uuid,
    /// Exercise selected when the session stopped
    pub exercise: ExerciseKind,
    /// Repetitions since the last reset or exercise change
    pub rep_count: u32,
    /// When tracking started
    pub started_at: DateTime<Utc>,
    /// When tracking stopped
    pub stopped_at: DateTime<Utc>,
    /// Frames handed to the tracker
    pub frames_processed: u64,
    /// Frames skipped for unusable landmarks
    pub frames_skipped: u64,
}

impl SessionSummary {
    /// Zero-rep sessions are not persisted
    #[must_use]
    pub const fn should_persist(&self) -> bool {
        self.rep_count > 0
    }
}

/// One tracking session.
///
/// The count is monotonic between resets. After [`stop`](Self::stop) the
/// session is frozen: frames are ignored and control calls fail.
pub struct Session {
    id: Uuid,
    tracker: Tracker,
    exercise: ExerciseKind,
    started_at: DateTime<Utc>,
    last_emitted_count: u32,
    last_emitted_phase: Phase,
    frames_processed: u64,
    frames_skipped: u64,
    stopped: bool,
    observer: Box<dyn SessionObserver + Send>,
}

impl Session {
    /// Start tracking `exercise`
    #[must_use]
    pub fn start(exercise: ExerciseKind) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            tracker: Tracker::new(exercise),
            exercise,
            started_at: Utc::now(),
            last_emitted_count: 0,
            last_emitted_phase: Phase::Start,
            frames_processed: 0,
            frames_skipped: 0,
            stopped: false,
            observer: Box::new(NoopObserver),
        };
        info!(session_id = %session.id, exercise = %exercise, "tracking session started");
        session
    }

    /// Override the landmark confidence floor
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.tracker = self.tracker.with_min_confidence(min_confidence);
        self
    }

    /// Attach the consumer of count and phase changes
    #[must_use]
    pub fn with_observer(mut self, observer: impl SessionObserver + Send + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Process one frame. Returns `None` once the session is stopped.
    pub fn on_frame(&mut self, frame: &Frame) -> Option<FrameOutcome> {
        if self.stopped {
            debug!(session_id = %self.id, "frame ignored after stop");
            return None;
        }
        let outcome = self.tracker.process_frame(frame);
        self.frames_processed += 1;
        if outcome.evaluation == Evaluation::Skipped {
            self.frames_skipped += 1;
        }
        self.emit_changes();
        Some(outcome)
    }

    /// Switch exercise; the count restarts from zero
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyStopped`] after [`stop`](Self::stop).
    pub fn select_exercise(&mut self, exercise: ExerciseKind) -> Result<(), SessionError> {
        self.ensure_running()?;
        info!(
            session_id = %self.id,
            from = %self.exercise,
            to = %exercise,
            discarded_reps = self.tracker.rep_count(),
            "exercise changed"
        );
        self.exercise = exercise;
        self.tracker.select_exercise(exercise);
        self.emit_changes();
        Ok(())
    }

    /// Restart the count for the current exercise
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyStopped`] after [`stop`](Self::stop).
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_running()?;
        info!(
            session_id = %self.id,
            exercise = %self.exercise,
            discarded_reps = self.tracker.rep_count(),
            "session reset"
        );
        self.tracker.reset();
        self.emit_changes();
        Ok(())
    }

    /// Freeze the session and hand back its final figures.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyStopped`] on every call after the first,
    /// so the final count can only be reported once.
    pub fn stop(&mut self) -> Result<SessionSummary, SessionError> {
        self.ensure_running()?;
        self.stopped = true;
        let summary = SessionSummary {
            session_id: self.id,
            exercise: self.exercise,
            rep_count: self.tracker.rep_count(),
            started_at: self.started_at,
            stopped_at: Utc::now(),
            frames_processed: self.frames_processed,
            frames_skipped: self.frames_skipped,
        };
        info!(
            session_id = %self.id,
            exercise = %summary.exercise,
            reps = summary.rep_count,
            frames = summary.frames_processed,
            skipped = summary.frames_skipped,
            "tracking session stopped"
        );
        Ok(summary)
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        if self.stopped {
            Err(SessionError::AlreadyStopped(self.id))
        } else {
            Ok(())
        }
    }

    fn emit_changes(&mut self) {
        let count = self.tracker.rep_count();
        if count != self.last_emitted_count {
            self.last_emitted_count = count;
            self.observer.on_rep_update(count);
        }
        let phase = self.tracker.phase();
        if phase != self.last_emitted_phase {
            self.last_emitted_phase = phase;
            self.observer.on_phase_change(phase);
        }
    }

    /// Session identifier
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Selected exercise
    #[must_use]
    pub const fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    /// Repetitions since the last reset
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.tracker.rep_count()
    }

    /// Current phase label
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.tracker.phase()
    }

    /// Tracker snapshot
    #[must_use]
    pub const fn state(&self) -> TrackerState {
        self.tracker.state()
    }

    /// When tracking started
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whether [`stop`](Self::stop) has been called
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.tracker.state())
            .field("frames_processed", &self.frames_processed)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}
