// ABOUTME: Exercise kinds and phase labels for repetition tracking
// ABOUTME: Defines identifiers, display names, persistence labels, and parsing for each kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Closed set of exercises the tracker knows how to count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExerciseKind {
    /// Push-up, counted on the way up
    #[serde(rename = "pushup")]
    PushUp,
    /// Pull-up, counted when the arms extend again
    #[serde(rename = "pullup")]
    PullUp,
    /// Bicep curl, counted when the forearm lowers
    #[default]
    #[serde(rename = "bicep_curls")]
    BicepCurl,
    /// Lateral shoulder raise, counted when the elbows lower
    #[serde(rename = "shoulder_raises")]
    ShoulderRaise,
    /// Overhead press, counted when the hands return to the shoulders
    #[serde(rename = "press")]
    Press,
    /// Squat, counted when standing back up
    #[serde(rename = "squats")]
    Squat,
    /// Deadlift, counted when the bar returns below the knees
    #[serde(rename = "deadlift")]
    Deadlift,
}

impl ExerciseKind {
    /// Every kind, in menu order
    pub const ALL: [Self; 7] = [
        Self::PushUp,
        Self::PullUp,
        Self::BicepCurl,
        Self::ShoulderRaise,
        Self::Press,
        Self::Squat,
        Self::Deadlift,
    ];

    /// Stable identifier used by the UI and on the command line
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::PushUp => "pushup",
            Self::PullUp => "pullup",
            Self::BicepCurl => "bicep_curls",
            Self::ShoulderRaise => "shoulder_raises",
            Self::Press => "press",
            Self::Squat => "squats",
            Self::Deadlift => "deadlift",
        }
    }

    /// Human-facing name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PushUp => "Push-ups",
            Self::PullUp => "Pull-ups",
            Self::BicepCurl => "Bicep Curls",
            Self::ShoulderRaise => "Shoulder Raises",
            Self::Press => "Press",
            Self::Squat => "Squats",
            Self::Deadlift => "Deadlift",
        }
    }

    /// Label the exercise log backend stores
    #[must_use]
    pub const fn persistence_label(self) -> &'static str {
        match self {
            Self::PushUp => "Push up",
            Self::PullUp => "Pull up",
            Self::BicepCurl => "Curls",
            Self::ShoulderRaise => "Shoulder raises",
            Self::Press => "Press",
            Self::Squat => "Squats",
            Self::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExerciseKind {
    type Err = AppError;

    /// Accepts either the identifier or the persistence label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.id().eq_ignore_ascii_case(trimmed)
                    || kind.persistence_label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| AppError::invalid_input(format!("unknown exercise '{trimmed}'")))
    }
}

/// Coarse exercise state label shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    /// Nothing observed yet since the last reset
    #[default]
    Start,
    /// Upper position
    Up,
    /// Lower position
    Down,
}

impl Phase {
    /// Uppercase overlay label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
