// ABOUTME: Per-exercise threshold rules that decide when the hysteresis gate flips
// ABOUTME: Pure functions over landmark y-coordinates; missing landmarks skip the frame
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

//! # Exercise Evaluator
//!
//! Each exercise has an *enter* condition, tested only while the gate is
//! disarmed, and an *exit* condition, tested only while it is armed. The two
//! are never mirror images around one boundary, so jitter near a single
//! value cannot flip the gate back and forth.
//!
//! | Exercise      | Enter (armed)                 | Phase | Counts | Exit (disarmed)                | Phase | Counts |
//! |---------------|-------------------------------|-------|--------|--------------------------------|-------|--------|
//! | PushUp        | y12 < y14                     | Up    | yes    | y12 - 60 > y14                 | Down  | no     |
//! | PullUp        | y12-50 < y16 and y11-50 < y15 | Up    | no     | y12-200 > y16 and y11-200 > y15 | Down  | yes    |
//! | BicepCurl     | y14-50 > y16 and y13-50 > y15 | Up    | no     | y14+70 < y16 and y15+70 > y13  | Down  | yes    |
//! | ShoulderRaise | y14+30 < y12 and y13+30 < y11 | Up    | no     | y14-30 > y12 and y13-30 > y11  | Down  | yes    |
//! | Press         | y12-50 < y16 and y11-50 < y15 | Down  | yes    | y12-200 > y16 and y11-200 > y15 | Up    | no     |
//! | Squat         | y24 > y26                     | Down  | no     | y24+50 < y26                   | Up    | yes    |
//! | Deadlift      | y25 > y15                     | Up    | no     | y25+70 < y15                   | Down  | yes    |
//!
//! Only y-coordinates are read. Image space puts y downward, so "less than"
//! means "visually above".

use trainwave_core::constants::thresholds::{
    CURL_ENTER_MARGIN, CURL_EXIT_MARGIN, DEADLIFT_EXIT_MARGIN, OVERHEAD_ENTER_MARGIN,
    OVERHEAD_EXIT_MARGIN, PUSHUP_EXIT_MARGIN, SHOULDER_RAISE_MARGIN, SQUAT_EXIT_MARGIN,
};
use trainwave_core::models::{ExerciseKind, Frame, JointIndex, Phase};

/// A gate flip produced by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Gate value after the flip
    pub active: bool,
    /// Phase label after the flip
    pub phase: Phase,
    /// Whether this flip completes a repetition
    pub counts: bool,
}

/// Result of evaluating one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// A required landmark was missing, non-finite, or under the confidence floor
    Skipped,
    /// Landmarks were usable but the condition under test did not hold
    Held,
    /// The gate flipped
    Fired(Transition),
}

impl Evaluation {
    /// The transition, if one fired
    #[must_use]
    pub const fn transition(self) -> Option<Transition> {
        match self {
            Self::Fired(transition) => Some(transition),
            Self::Skipped | Self::Held => None,
        }
    }
}

/// Phase and count marking for one direction of the gate
#[derive(Clone, Copy)]
struct Edge {
    phase: Phase,
    counts: bool,
}

#[derive(Clone, Copy)]
struct RulePair {
    enter: Edge,
    exit: Edge,
}

const fn edge(phase: Phase, counts: bool) -> Edge {
    Edge { phase, counts }
}

const fn rules(kind: ExerciseKind) -> RulePair {
    match kind {
        ExerciseKind::PushUp => RulePair {
            enter: edge(Phase::Up, true),
            exit: edge(Phase::Down, false),
        },
        ExerciseKind::Press => RulePair {
            enter: edge(Phase::Down, true),
            exit: edge(Phase::Up, false),
        },
        ExerciseKind::Squat => RulePair {
            enter: edge(Phase::Down, false),
            exit: edge(Phase::Up, true),
        },
        ExerciseKind::PullUp
        | ExerciseKind::BicepCurl
        | ExerciseKind::ShoulderRaise
        | ExerciseKind::Deadlift => RulePair {
            enter: edge(Phase::Up, false),
            exit: edge(Phase::Down, true),
        },
    }
}

const PUSH_UP_JOINTS: [JointIndex; 2] = [JointIndex::RIGHT_SHOULDER, JointIndex::RIGHT_ELBOW];
const OVERHEAD_JOINTS: [JointIndex; 4] = [
    JointIndex::LEFT_SHOULDER,
    JointIndex::RIGHT_SHOULDER,
    JointIndex::LEFT_WRIST,
    JointIndex::RIGHT_WRIST,
];
const ARM_JOINTS: [JointIndex; 4] = [
    JointIndex::LEFT_ELBOW,
    JointIndex::RIGHT_ELBOW,
    JointIndex::LEFT_WRIST,
    JointIndex::RIGHT_WRIST,
];
const SHOULDER_RAISE_JOINTS: [JointIndex; 4] = [
    JointIndex::LEFT_SHOULDER,
    JointIndex::RIGHT_SHOULDER,
    JointIndex::LEFT_ELBOW,
    JointIndex::RIGHT_ELBOW,
];
const SQUAT_JOINTS: [JointIndex; 2] = [JointIndex::RIGHT_HIP, JointIndex::RIGHT_KNEE];
const DEADLIFT_JOINTS: [JointIndex; 2] = [JointIndex::LEFT_WRIST, JointIndex::LEFT_KNEE];

/// Landmarks a frame must carry for `kind` to be evaluated at all
#[must_use]
pub const fn required_joints(kind: ExerciseKind) -> &'static [JointIndex] {
    match kind {
        ExerciseKind::PushUp => &PUSH_UP_JOINTS,
        ExerciseKind::PullUp | ExerciseKind::Press => &OVERHEAD_JOINTS,
        ExerciseKind::BicepCurl => &ARM_JOINTS,
        ExerciseKind::ShoulderRaise => &SHOULDER_RAISE_JOINTS,
        ExerciseKind::Squat => &SQUAT_JOINTS,
        ExerciseKind::Deadlift => &DEADLIFT_JOINTS,
    }
}

/// Confidence-gated y lookups into one frame
struct Joints<'a> {
    frame: &'a Frame,
    min_confidence: f32,
}

impl Joints<'_> {
    fn y(&self, joint: JointIndex) -> Option<f32> {
        self.frame.usable_y(joint, self.min_confidence)
    }
}

/// Wrists within the enter margin below the shoulders (or anywhere above them)
fn hands_near_shoulders(j: &Joints<'_>) -> Option<bool> {
    let (ls, rs) = (j.y(JointIndex::LEFT_SHOULDER)?, j.y(JointIndex::RIGHT_SHOULDER)?);
    let (lw, rw) = (j.y(JointIndex::LEFT_WRIST)?, j.y(JointIndex::RIGHT_WRIST)?);
    Some(rs - OVERHEAD_ENTER_MARGIN < rw && ls - OVERHEAD_ENTER_MARGIN < lw)
}

/// Wrists well above the shoulders
fn hands_overhead(j: &Joints<'_>) -> Option<bool> {
    let (ls, rs) = (j.y(JointIndex::LEFT_SHOULDER)?, j.y(JointIndex::RIGHT_SHOULDER)?);
    let (lw, rw) = (j.y(JointIndex::LEFT_WRIST)?, j.y(JointIndex::RIGHT_WRIST)?);
    Some(rs - OVERHEAD_EXIT_MARGIN > rw && ls - OVERHEAD_EXIT_MARGIN > lw)
}

/// `None` when a required landmark is unusable
fn enter_condition(kind: ExerciseKind, j: &Joints<'_>) -> Option<bool> {
    match kind {
        ExerciseKind::PushUp => {
            Some(j.y(JointIndex::RIGHT_SHOULDER)? < j.y(JointIndex::RIGHT_ELBOW)?)
        }
        ExerciseKind::PullUp | ExerciseKind::Press => hands_near_shoulders(j),
        ExerciseKind::BicepCurl => {
            let (le, re) = (j.y(JointIndex::LEFT_ELBOW)?, j.y(JointIndex::RIGHT_ELBOW)?);
            let (lw, rw) = (j.y(JointIndex::LEFT_WRIST)?, j.y(JointIndex::RIGHT_WRIST)?);
            Some(re - CURL_ENTER_MARGIN > rw && le - CURL_ENTER_MARGIN > lw)
        }
        ExerciseKind::ShoulderRaise => {
            let (ls, rs) = (j.y(JointIndex::LEFT_SHOULDER)?, j.y(JointIndex::RIGHT_SHOULDER)?);
            let (le, re) = (j.y(JointIndex::LEFT_ELBOW)?, j.y(JointIndex::RIGHT_ELBOW)?);
            Some(re + SHOULDER_RAISE_MARGIN < rs && le + SHOULDER_RAISE_MARGIN < ls)
        }
        ExerciseKind::Squat => Some(j.y(JointIndex::RIGHT_HIP)? > j.y(JointIndex::RIGHT_KNEE)?),
        ExerciseKind::Deadlift => Some(j.y(JointIndex::LEFT_KNEE)? > j.y(JointIndex::LEFT_WRIST)?),
    }
}

/// `None` when a required landmark is unusable
fn exit_condition(kind: ExerciseKind, j: &Joints<'_>) -> Option<bool> {
    match kind {
        ExerciseKind::PushUp => Some(
            j.y(JointIndex::RIGHT_SHOULDER)? - PUSHUP_EXIT_MARGIN > j.y(JointIndex::RIGHT_ELBOW)?,
        ),
        ExerciseKind::PullUp | ExerciseKind::Press => hands_overhead(j),
        ExerciseKind::BicepCurl => {
            let (le, re) = (j.y(JointIndex::LEFT_ELBOW)?, j.y(JointIndex::RIGHT_ELBOW)?);
            let (lw, rw) = (j.y(JointIndex::LEFT_WRIST)?, j.y(JointIndex::RIGHT_WRIST)?);
            // Left clause is wrist-relative, unlike the right one; kept as tuned.
            Some(re + CURL_EXIT_MARGIN < rw && lw + CURL_EXIT_MARGIN > le)
        }
        ExerciseKind::ShoulderRaise => {
            let (ls, rs) = (j.y(JointIndex::LEFT_SHOULDER)?, j.y(JointIndex::RIGHT_SHOULDER)?);
            let (le, re) = (j.y(JointIndex::LEFT_ELBOW)?, j.y(JointIndex::RIGHT_ELBOW)?);
            Some(re - SHOULDER_RAISE_MARGIN > rs && le - SHOULDER_RAISE_MARGIN > ls)
        }
        ExerciseKind::Squat => Some(
            j.y(JointIndex::RIGHT_HIP)? + SQUAT_EXIT_MARGIN < j.y(JointIndex::RIGHT_KNEE)?,
        ),
        ExerciseKind::Deadlift => Some(
            j.y(JointIndex::LEFT_KNEE)? + DEADLIFT_EXIT_MARGIN < j.y(JointIndex::LEFT_WRIST)?,
        ),
    }
}

/// Evaluate one frame for `kind` given the current gate.
///
/// With the gate disarmed only the enter condition is tested; with it armed
/// only the exit condition is. `None` for `kind` (nothing selected) always
/// yields [`Evaluation::Held`].
#[must_use]
pub fn evaluate(
    kind: Option<ExerciseKind>,
    frame: &Frame,
    active: bool,
    min_confidence: f32,
) -> Evaluation {
    let Some(kind) = kind else {
        return Evaluation::Held;
    };
    let joints = Joints {
        frame,
        min_confidence,
    };
    let pair = rules(kind);
    let (condition, edge) = if active {
        (exit_condition(kind, &joints), pair.exit)
    } else {
        (enter_condition(kind, &joints), pair.enter)
    };

    match condition {
        None => Evaluation::Skipped,
        Some(false) => Evaluation::Held,
        Some(true) => Evaluation::Fired(Transition {
            active: !active,
            phase: edge.phase,
            counts: edge.counts,
        }),
    }
}
