// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave
// ABOUTME: Output formatting helpers for trainwave-cli
// ABOUTME: Prints live rep and phase updates and the final session report

use trainwave::{
    runner::{PersistOutcome, SessionOutcome},
    tracking::SessionEvent,
};

/// Print one live update
pub fn display_event(event: SessionEvent) {
    match event {
        SessionEvent::RepUpdate(count) => println!("  reps: {count}"),
        SessionEvent::PhaseChange(phase) => println!("  phase: {phase}"),
    }
}

/// Print the final report of a replay
pub fn display_outcome(outcome: &SessionOutcome) {
    let summary = &outcome.summary;
    println!("\nSession complete");
    println!("{}", "=".repeat(40));
    println!("   Exercise: {}", summary.exercise.display_name());
    println!("   Reps: {}", summary.rep_count);
    println!(
        "   Frames: {} ({} skipped)",
        summary.frames_processed, summary.frames_skipped
    );
    println!("   Ended: {:?}", outcome.reason);
    match &outcome.persistence {
        PersistOutcome::Persisted(record) => {
            println!("   Saved: {} reps of {} ({})", record.reps, record.exercise.persistence_label(), record.id);
        }
        PersistOutcome::Skipped => println!("   Saved: no"),
        PersistOutcome::Failed(e) => println!("   Saved: FAILED ({e})"),
    }
    println!("{}", "=".repeat(40));
}
