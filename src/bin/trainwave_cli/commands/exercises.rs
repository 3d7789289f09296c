// ABOUTME: Exercise listing command for trainwave-cli
// ABOUTME: Prints every supported exercise with its labels and required landmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

use trainwave::{models::ExerciseKind, tracking::required_joints};

/// Print the exercise table
pub fn list() {
    println!(
        "{:<16} {:<16} {:<16} JOINTS",
        "ID", "NAME", "LOG LABEL"
    );
    for kind in ExerciseKind::ALL {
        let joints = required_joints(kind)
            .iter()
            .map(|joint| joint.get().to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{:<16} {:<16} {:<16} {joints}",
            kind.id(),
            kind.display_name(),
            kind.persistence_label()
        );
    }
    println!("\nDefault: {}", ExerciseKind::default().id());
}
