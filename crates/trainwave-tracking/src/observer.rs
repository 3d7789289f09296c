// ABOUTME: Observer seam through which a session reports count and phase changes
// ABOUTME: Closures over SessionEvent implement it directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use serde::Serialize;
use trainwave_core::models::Phase;

/// A change a session reports to its consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Repetition count changed
    RepUpdate(u32),
    /// Phase label changed
    PhaseChange(Phase),
}

/// Receives change notifications from a [`Session`](crate::Session).
///
/// Called synchronously on the frame path, so implementations must return
/// quickly and must not call back into the session.
pub trait SessionObserver {
    /// Repetition count changed
    fn on_rep_update(&mut self, _count: u32) {}

    /// Phase label changed
    fn on_phase_change(&mut self, _phase: Phase) {}
}

impl<F> SessionObserver for F
where
    F: FnMut(SessionEvent),
{
    fn on_rep_update(&mut self, count: u32) {
        self(SessionEvent::RepUpdate(count));
    }

    fn on_phase_change(&mut self, phase: Phase) {
        self(SessionEvent::PhaseChange(phase));
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
