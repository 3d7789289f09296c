// ABOUTME: Tracker state machine binding phase, hysteresis gate, and rep count to the evaluator
// ABOUTME: Applies at most one transition per frame and resets cleanly on exercise change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use serde::Serialize;
use tracing::{debug, trace};
use trainwave_core::constants::capture::DEFAULT_MIN_CONFIDENCE;
use trainwave_core::models::{ExerciseKind, Frame, Phase};

use crate::evaluator::{evaluate, Evaluation};

/// Snapshot of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackerState {
    /// Selected exercise; `None` evaluates every frame as a no-op
    pub exercise: Option<ExerciseKind>,
    /// Current phase label
    pub phase: Phase,
    /// Hysteresis gate
    pub active: bool,
    /// Repetitions since the last reset
    pub rep_count: u32,
}

impl TrackerState {
    /// `(Start, inactive, 0)` for `exercise`
    #[must_use]
    pub const fn initial(exercise: Option<ExerciseKind>) -> Self {
        Self {
            exercise,
            phase: Phase::Start,
            active: false,
            rep_count: 0,
        }
    }
}

/// What one processed frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Count after the frame
    pub rep_count: u32,
    /// Phase after the frame
    pub phase: Phase,
    /// Raw evaluator result
    pub evaluation: Evaluation,
    /// The frame added one repetition
    pub counted: bool,
    /// The frame changed the phase label
    pub phase_changed: bool,
}

/// Per-frame state machine.
///
/// States are `{Start, Up, Down} x {active}` starting from `(Start, false)`.
/// There is no terminal state; the machine runs until its owner drops it.
#[derive(Debug, Clone)]
pub struct Tracker {
    state: TrackerState,
    min_confidence: f32,
}

impl Tracker {
    /// Tracker for `exercise` with the default confidence floor
    #[must_use]
    pub const fn new(exercise: ExerciseKind) -> Self {
        Self {
            state: TrackerState::initial(Some(exercise)),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    /// Tracker with nothing selected; every frame is a no-op until
    /// [`select_exercise`](Self::select_exercise) is called
    #[must_use]
    pub const fn unselected() -> Self {
        Self {
            state: TrackerState::initial(None),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    /// Override the landmark confidence floor
    #[must_use]
    pub const fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Switch exercise and return to `(Start, false, 0)`
    pub fn select_exercise(&mut self, exercise: ExerciseKind) {
        self.state = TrackerState::initial(Some(exercise));
        debug!(exercise = %exercise, "tracker exercise selected");
    }

    /// Return to `(Start, false, 0)` keeping the current exercise
    pub fn reset(&mut self) {
        self.state = TrackerState::initial(self.state.exercise);
        debug!(exercise = ?self.state.exercise, "tracker reset");
    }

    /// Evaluate one frame and apply at most one transition
    pub fn process_frame(&mut self, frame: &Frame) -> FrameOutcome {
        let evaluation = evaluate(
            self.state.exercise,
            frame,
            self.state.active,
            self.min_confidence,
        );
        let previous_phase = self.state.phase;
        let mut counted = false;

        match evaluation {
            Evaluation::Fired(transition) => {
                self.state.active = transition.active;
                self.state.phase = transition.phase;
                if transition.counts {
                    self.state.rep_count = self.state.rep_count.saturating_add(1);
                    counted = true;
                }
                debug!(
                    exercise = ?self.state.exercise,
                    phase = %self.state.phase,
                    active = self.state.active,
                    reps = self.state.rep_count,
                    timestamp_ms = frame.timestamp_ms(),
                    "tracker transition"
                );
            }
            Evaluation::Skipped => {
                trace!(timestamp_ms = frame.timestamp_ms(), "frame skipped: landmarks unusable");
            }
            Evaluation::Held => {}
        }

        FrameOutcome {
            rep_count: self.state.rep_count,
            phase: self.state.phase,
            evaluation,
            counted,
            phase_changed: self.state.phase != previous_phase,
        }
    }

    /// Current snapshot
    #[must_use]
    pub const fn state(&self) -> TrackerState {
        self.state
    }

    /// Selected exercise
    #[must_use]
    pub const fn exercise(&self) -> Option<ExerciseKind> {
        self.state.exercise
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Current gate
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.active
    }

    /// Repetitions since the last reset
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.state.rep_count
    }

    /// Landmark confidence floor in use
    #[must_use]
    pub const fn min_confidence(&self) -> f32 {
        self.min_confidence
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::unselected()
    }
}
