// ABOUTME: Integration tests for the async session runner
// ABOUTME: Exercises stop, cancellation, mid-session control, and persistence of the final count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::{cycles, enter_pose, exit_pose, init_test_logging};
use tokio::sync::watch;
use trainwave::errors::{AppError, AppResult, ErrorCode};
use trainwave::frame_source::{ChannelFrameSource, FrameSender, FrameSource};
use trainwave::models::{ExerciseKind, ExerciseRecord, Frame, Phase};
use trainwave::persistence::{ExerciseLogger, InMemoryExerciseLogger};
use trainwave::runner::{PersistOutcome, SessionRunner, StopReason};
use trainwave::tracking::{Session, SessionEvent};

/// Logger that always fails and counts attempts
#[derive(Default)]
struct FailingLogger {
    attempts: AtomicUsize,
}

#[async_trait]
impl ExerciseLogger for FailingLogger {
    async fn log_exercise(&self, _exercise: ExerciseKind, _reps: u32) -> AppResult<ExerciseRecord> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::external_unavailable("exercise-log", "connection refused"))
    }
}

/// Session whose rep count is mirrored into a watch channel
fn watched_session(kind: ExerciseKind) -> (Session, watch::Receiver<u32>) {
    let (tx, rx) = watch::channel(0);
    let session = Session::start(kind).with_observer(move |event: SessionEvent| {
        if let SessionEvent::RepUpdate(count) = event {
            let _ = tx.send(count);
        }
    });
    (session, rx)
}

async fn send_all(sender: &FrameSender, frames: Vec<Frame>) {
    for frame in frames {
        sender.send(frame).await.unwrap();
    }
}

#[tokio::test]
async fn test_source_end_persists_count() {
    init_test_logging();
    let logger = Arc::new(InMemoryExerciseLogger::new());
    let (sender, source) = ChannelFrameSource::new();
    let (runner, _handle) = SessionRunner::new(Session::start(ExerciseKind::Squat));
    let runner = runner.with_logger(logger.clone());
    let task = tokio::spawn(runner.run(source.subscribe()));

    send_all(&sender, cycles(ExerciseKind::Squat, 3)).await;
    drop(sender);

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.reason, StopReason::SourceEnded);
    assert_eq!(outcome.summary.rep_count, 3);
    assert!(outcome.persistence.is_persisted());

    let records = logger.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].exercise, ExerciseKind::Squat);
    assert_eq!(records[0].reps, 3);
}

#[tokio::test]
async fn test_zero_reps_never_reach_the_logger() {
    init_test_logging();
    let logger = Arc::new(InMemoryExerciseLogger::new());
    let (sender, source) = ChannelFrameSource::new();
    let (runner, _handle) = SessionRunner::new(Session::start(ExerciseKind::Squat));
    let task = tokio::spawn(runner.with_logger(logger.clone()).run(source.subscribe()));

    // Standing only: never armed, never counted.
    send_all(&sender, vec![exit_pose(ExerciseKind::Squat); 5]).await;
    drop(sender);

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.summary.rep_count, 0);
    assert_eq!(outcome.summary.frames_processed, 5);
    assert!(matches!(outcome.persistence, PersistOutcome::Skipped));
    assert!(logger.records().await.is_empty());
}

#[tokio::test]
async fn test_stop_command_ends_session() {
    init_test_logging();
    let logger = Arc::new(InMemoryExerciseLogger::new());
    let (session, mut reps) = watched_session(ExerciseKind::PushUp);
    let (sender, source) = ChannelFrameSource::new();
    let (runner, handle) = SessionRunner::new(session);
    let task = tokio::spawn(runner.with_logger(logger.clone()).run(source.subscribe()));

    send_all(&sender, cycles(ExerciseKind::PushUp, 2)).await;
    reps.wait_for(|count| *count == 2).await.unwrap();
    handle.stop().await.unwrap();

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.reason, StopReason::Requested);
    assert_eq!(outcome.summary.rep_count, 2);
    assert_eq!(logger.records().await.len(), 1);

    // The runner is gone; the count cannot be reported again.
    assert!(handle.is_finished());
    let err = handle.stop().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SessionAlreadyStopped);
    assert!(sender.is_closed());
    assert_eq!(logger.records().await.len(), 1);
}

#[tokio::test]
async fn test_exercise_switch_lands_between_frames() {
    init_test_logging();
    let logger = Arc::new(InMemoryExerciseLogger::new());
    let (session, mut reps) = watched_session(ExerciseKind::BicepCurl);
    let (sender, source) = ChannelFrameSource::new();
    let (runner, handle) = SessionRunner::new(session);
    let task = tokio::spawn(runner.with_logger(logger.clone()).run(source.subscribe()));

    send_all(&sender, cycles(ExerciseKind::BicepCurl, 3)).await;
    reps.wait_for(|count| *count == 3).await.unwrap();

    handle.select_exercise(ExerciseKind::Squat).await.unwrap();
    send_all(&sender, cycles(ExerciseKind::Squat, 1)).await;
    drop(sender);

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.summary.exercise, ExerciseKind::Squat);
    assert_eq!(outcome.summary.rep_count, 1);

    let records = logger.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].exercise, ExerciseKind::Squat);
    assert_eq!(records[0].reps, 1);
}

#[tokio::test]
async fn test_exercise_switch_overtakes_buffered_frame() {
    init_test_logging();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut session = Session::start(ExerciseKind::BicepCurl)
        .with_observer(move |event: SessionEvent| sink.lock().unwrap().push(event));
    for frame in cycles(ExerciseKind::BicepCurl, 2) {
        session.on_frame(&frame);
    }
    session.on_frame(&enter_pose(ExerciseKind::BicepCurl));
    assert_eq!(session.rep_count(), 2);
    assert!(session.state().active);

    let (sender, source) = ChannelFrameSource::new();
    let subscription = source.subscribe();
    let (runner, handle) = SessionRunner::new(session);

    // Under curls this frame would complete a third rep.
    assert!(sender.try_send(exit_pose(ExerciseKind::BicepCurl)).unwrap());
    handle.select_exercise(ExerciseKind::Squat).await.unwrap();
    drop(sender);

    let outcome = runner.run(subscription).await.unwrap();
    assert_eq!(outcome.reason, StopReason::SourceEnded);
    assert_eq!(outcome.summary.exercise, ExerciseKind::Squat);
    assert_eq!(outcome.summary.rep_count, 0);
    // The buffered curl frame was evaluated as a squat: no hip or knee landmarks.
    assert_eq!(outcome.summary.frames_processed, 6);
    assert_eq!(outcome.summary.frames_skipped, 1);
    assert!(matches!(outcome.persistence, PersistOutcome::Skipped));

    let events = events.lock().unwrap();
    assert_eq!(
        events[events.len() - 2..],
        [SessionEvent::RepUpdate(0), SessionEvent::PhaseChange(Phase::Start)]
    );
}

#[tokio::test]
async fn test_pending_stop_wins_over_queued_frame() {
    init_test_logging();
    let logger = Arc::new(InMemoryExerciseLogger::new());
    let mut session = Session::start(ExerciseKind::Squat);
    for frame in cycles(ExerciseKind::Squat, 1) {
        session.on_frame(&frame);
    }
    session.on_frame(&enter_pose(ExerciseKind::Squat));
    assert_eq!(session.rep_count(), 1);

    let (sender, source) = ChannelFrameSource::new();
    let subscription = source.subscribe();
    let (runner, handle) = SessionRunner::new(session);
    let runner = runner.with_logger(logger.clone());

    // This frame would count a second squat if it were processed.
    assert!(sender.try_send(exit_pose(ExerciseKind::Squat)).unwrap());
    handle.stop().await.unwrap();

    let outcome = runner.run(subscription).await.unwrap();
    assert_eq!(outcome.reason, StopReason::Requested);
    assert_eq!(outcome.summary.rep_count, 1);
    assert_eq!(outcome.summary.frames_processed, 3);

    let records = logger.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reps, 1);
    assert!(sender.is_closed());
}

#[tokio::test]
async fn test_reset_discards_count() {
    init_test_logging();
    let (session, mut reps) = watched_session(ExerciseKind::Deadlift);
    let (sender, source) = ChannelFrameSource::new();
    let (runner, handle) = SessionRunner::new(session);
    let task = tokio::spawn(runner.run(source.subscribe()));

    send_all(&sender, cycles(ExerciseKind::Deadlift, 2)).await;
    reps.wait_for(|count| *count == 2).await.unwrap();
    handle.reset().await.unwrap();
    drop(sender);

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.summary.rep_count, 0);
    assert!(matches!(outcome.persistence, PersistOutcome::Skipped));
}

#[tokio::test]
async fn test_cancelled_subscription_stops_runner() {
    init_test_logging();
    let (session, mut reps) = watched_session(ExerciseKind::PushUp);
    let (sender, source) = ChannelFrameSource::new();
    let subscription = source.subscribe();
    let cancel = subscription.cancel_handle();
    let (runner, _handle) = SessionRunner::new(session);
    let task = tokio::spawn(runner.run(subscription));

    send_all(&sender, cycles(ExerciseKind::PushUp, 1)).await;
    reps.wait_for(|count| *count == 1).await.unwrap();
    cancel.cancel();

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.reason, StopReason::Cancelled);
    assert_eq!(outcome.summary.rep_count, 1);
    // No logger attached, so nothing is persisted even with reps.
    assert!(matches!(outcome.persistence, PersistOutcome::Skipped));
}

#[tokio::test]
async fn test_persistence_failure_is_surfaced_not_raised() {
    init_test_logging();
    let logger = Arc::new(FailingLogger::default());
    let (sender, source) = ChannelFrameSource::new();
    let (runner, _handle) = SessionRunner::new(Session::start(ExerciseKind::Press));
    let task = tokio::spawn(runner.with_logger(logger.clone()).run(source.subscribe()));

    send_all(&sender, cycles(ExerciseKind::Press, 2)).await;
    drop(sender);

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.summary.rep_count, 2);
    match outcome.persistence {
        PersistOutcome::Failed(err) => {
            assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(logger.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dropped_handles_do_not_stop_the_run() {
    init_test_logging();
    let (sender, source) = ChannelFrameSource::new();
    let (runner, handle) = SessionRunner::new(Session::start(ExerciseKind::Squat));
    drop(handle);
    let task = tokio::spawn(runner.run(source.subscribe()));

    send_all(&sender, cycles(ExerciseKind::Squat, 2)).await;
    drop(sender);

    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome.reason, StopReason::SourceEnded);
    assert_eq!(outcome.summary.rep_count, 2);
}
