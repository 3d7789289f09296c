// ABOUTME: Core data models for pose-driven repetition tracking
// ABOUTME: Re-exports landmark, frame, exercise, phase, and record types

mod exercise;
mod landmark;
mod record;

pub use exercise::{ExerciseKind, Phase};
pub use landmark::{Frame, JointIndex, Landmark};
pub use record::ExerciseRecord;
