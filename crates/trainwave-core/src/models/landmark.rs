// ABOUTME: Body landmark and frame types consumed by the repetition tracker
// ABOUTME: JointIndex keys into the fixed 33-slot layout; Frame is an immutable snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::joints;
use crate::errors::AppError;

/// Index into the fixed 33-slot body landmark layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct JointIndex(usize);

impl JointIndex {
    /// Nose
    pub const NOSE: Self = Self(joints::NOSE);
    /// Left shoulder
    pub const LEFT_SHOULDER: Self = Self(joints::LEFT_SHOULDER);
    /// Right shoulder
    pub const RIGHT_SHOULDER: Self = Self(joints::RIGHT_SHOULDER);
    /// Left elbow
    pub const LEFT_ELBOW: Self = Self(joints::LEFT_ELBOW);
    /// Right elbow
    pub const RIGHT_ELBOW: Self = Self(joints::RIGHT_ELBOW);
    /// Left wrist
    pub const LEFT_WRIST: Self = Self(joints::LEFT_WRIST);
    /// Right wrist
    pub const RIGHT_WRIST: Self = Self(joints::RIGHT_WRIST);
    /// Left hip
    pub const LEFT_HIP: Self = Self(joints::LEFT_HIP);
    /// Right hip
    pub const RIGHT_HIP: Self = Self(joints::RIGHT_HIP);
    /// Left knee
    pub const LEFT_KNEE: Self = Self(joints::LEFT_KNEE);
    /// Right knee
    pub const RIGHT_KNEE: Self = Self(joints::RIGHT_KNEE);

    /// Build an index, rejecting anything outside the 33-slot layout
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < joints::LANDMARK_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Raw slot number
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for JointIndex {
    type Error = AppError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index).ok_or_else(|| {
            AppError::out_of_range(format!(
                "joint index {index} outside 0..{}",
                joints::LANDMARK_COUNT
            ))
        })
    }
}

impl From<JointIndex> for usize {
    fn from(joint: JointIndex) -> Self {
        joint.0
    }
}

impl fmt::Display for JointIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single 2D body keypoint.
///
/// Coordinates are in image space: y grows downward, so a larger y is
/// visually lower. The pose engine calls the confidence value `visibility`,
/// and both names are accepted when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position
    pub x: f32,
    /// Vertical position (downward positive)
    pub y: f32,
    /// Detection confidence in `[0, 1]`, if the producer reports one
    #[serde(default, alias = "visibility", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl Landmark {
    /// Landmark without a confidence score
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            confidence: None,
        }
    }

    /// Attach a confidence score
    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Finite coordinates and, when a score is present, at least `min_confidence`
    #[must_use]
    pub fn is_usable(&self, min_confidence: f32) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.confidence.map_or(true, |c| c >= min_confidence)
    }

    /// Map a normalized `[0, 1]` landmark onto a `width` x `height` pixel surface
    #[must_use]
    pub fn scaled(self, width: f32, height: f32) -> Self {
        Self {
            x: self.x * width,
            y: self.y * height,
            confidence: self.confidence,
        }
    }
}

/// One sampled instant's landmarks plus its capture timestamp.
///
/// Immutable once built; slots the producer did not fill stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    landmarks: [Option<Landmark>; joints::LANDMARK_COUNT],
    timestamp_ms: u64,
}

impl Frame {
    /// Empty frame (every slot missing)
    #[must_use]
    pub const fn new(timestamp_ms: u64) -> Self {
        Self {
            landmarks: [None; joints::LANDMARK_COUNT],
            timestamp_ms,
        }
    }

    /// Builder-style slot assignment
    #[must_use]
    pub fn with_landmark(mut self, joint: JointIndex, landmark: Landmark) -> Self {
        self.landmarks[joint.0] = Some(landmark);
        self
    }

    /// Build from explicit `(joint, landmark)` pairs; later pairs win
    #[must_use]
    pub fn from_landmarks(
        timestamp_ms: u64,
        landmarks: impl IntoIterator<Item = (JointIndex, Landmark)>,
    ) -> Self {
        let mut frame = Self::new(timestamp_ms);
        for (joint, landmark) in landmarks {
            frame.landmarks[joint.0] = Some(landmark);
        }
        frame
    }

    /// Build from the pose engine's normalized output, scaled into pixel space.
    ///
    /// Points are taken in slot order; anything past slot 32 is ignored and
    /// short inputs leave the trailing slots missing.
    #[must_use]
    pub fn from_normalized(points: &[Landmark], width: u32, height: u32, timestamp_ms: u64) -> Self {
        let (w, h) = (width as f32, height as f32);
        let mut frame = Self::new(timestamp_ms);
        for (slot, point) in frame.landmarks.iter_mut().zip(points) {
            *slot = Some(point.scaled(w, h));
        }
        frame
    }

    /// Landmark at `joint`, if the producer supplied one
    #[must_use]
    pub fn landmark(&self, joint: JointIndex) -> Option<&Landmark> {
        self.landmarks[joint.0].as_ref()
    }

    /// Y coordinate at `joint`, or `None` when missing or below `min_confidence`
    #[must_use]
    pub fn usable_y(&self, joint: JointIndex, min_confidence: f32) -> Option<f32> {
        self.landmark(joint)
            .filter(|landmark| landmark.is_usable(min_confidence))
            .map(|landmark| landmark.y)
    }

    /// Capture timestamp in milliseconds
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Number of filled slots
    #[must_use]
    pub fn landmark_count(&self) -> usize {
        self.landmarks.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_index_bounds() {
        assert_eq!(JointIndex::new(32).map(JointIndex::get), Some(32));
        assert!(JointIndex::new(33).is_none());
        assert!(JointIndex::try_from(99).is_err());
    }

    #[test]
    fn test_from_normalized_scales_and_truncates() {
        let points = vec![Landmark::new(0.5, 0.25).with_confidence(0.9); 40];
        let frame = Frame::from_normalized(&points, 640, 480, 7);
        assert_eq!(frame.landmark_count(), 33);
        let lm = frame.landmark(JointIndex::RIGHT_WRIST).copied();
        assert_eq!(lm, Some(Landmark::new(320.0, 120.0).with_confidence(0.9)));
        assert_eq!(frame.timestamp_ms(), 7);
    }

    #[test]
    fn test_usable_y_applies_confidence_gate() {
        let frame = Frame::new(0)
            .with_landmark(JointIndex::LEFT_KNEE, Landmark::new(1.0, 2.0).with_confidence(0.3))
            .with_landmark(JointIndex::RIGHT_KNEE, Landmark::new(1.0, 3.0))
            .with_landmark(JointIndex::NOSE, Landmark::new(1.0, f32::NAN));
        assert_eq!(frame.usable_y(JointIndex::LEFT_KNEE, 0.5), None);
        assert_eq!(frame.usable_y(JointIndex::LEFT_KNEE, 0.2), Some(2.0));
        assert_eq!(frame.usable_y(JointIndex::RIGHT_KNEE, 0.99), Some(3.0));
        assert_eq!(frame.usable_y(JointIndex::NOSE, 0.0), None);
        assert_eq!(frame.usable_y(JointIndex::LEFT_HIP, 0.0), None);
    }

    #[test]
    fn test_visibility_alias_deserializes() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.1,"y":0.2,"visibility":0.8}"#).unwrap();
        assert_eq!(lm.confidence, Some(0.8));
    }
}
