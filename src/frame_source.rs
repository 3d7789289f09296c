// ABOUTME: Frame source interface plus push-channel and JSON-lines replay implementations
// ABOUTME: Subscriptions are cancellable streams that stop delivering as soon as cancel is requested
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

//! # Frame Sources
//!
//! A frame source is whatever produces landmark frames: a camera-backed pose
//! engine, a test harness, or a recorded session on disk. The tracker only
//! sees the [`Subscription`] stream, pulled one frame at a time, so there is
//! never more than one frame in flight and nothing is reordered.
//!
//! ## Replay format
//!
//! One JSON object per line, landmarks normalized to `[0, 1]`:
//!
//! ```text
//! {"timestamp_ms": 33, "landmarks": [{"x": 0.51, "y": 0.22, "visibility": 0.98}, ...]}
//! ```

use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_stream::stream;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use crate::constants::capture::FRAME_CHANNEL_CAPACITY;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{Frame, Landmark};

/// Boxed stream of frames
pub type FrameStream = Pin<Box<dyn Stream<Item = Frame> + Send>>;

/// Cloneable, idempotent cancellation for one subscription
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Fresh, not-yet-cancelled handle
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Request cancellation; later calls are no-ops
    pub fn cancel(&self) {
        if !self.sender.send_replace(true) {
            debug!("frame subscription cancelled");
        }
    }

    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once cancellation has been requested
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Live delivery of frames from a source until cancelled or exhausted
pub struct Subscription {
    frames: FrameStream,
    cancel: CancelHandle,
}

impl Subscription {
    /// Wrap `frames` so delivery stops once the subscription is cancelled
    #[must_use]
    pub fn new(frames: impl Stream<Item = Frame> + Send + 'static) -> Self {
        let cancel = CancelHandle::new();
        Self {
            frames: cancellable(frames, cancel.clone()),
            cancel,
        }
    }

    /// Handle that can cancel this subscription from elsewhere
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stop delivery
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Stream for Subscription {
    type Item = Frame;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.frames.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

fn cancellable<S>(frames: S, cancel: CancelHandle) -> FrameStream
where
    S: Stream<Item = Frame> + Send + 'static,
{
    Box::pin(stream! {
        let mut frames = Box::pin(frames);
        while !cancel.is_cancelled() {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                next = frames.next() => next,
            };
            match next {
                Some(frame) => yield frame,
                None => break,
            }
        }
    })
}

/// Producer of landmark frames
pub trait FrameSource {
    /// Begin delivery; frames arrive in production order until the
    /// subscription is cancelled or the source runs dry
    fn subscribe(self) -> Subscription;
}

/// Producer half of a [`ChannelFrameSource`]
#[derive(Debug, Clone)]
pub struct FrameSender {
    sender: mpsc::Sender<Frame>,
}

impl FrameSender {
    /// Deliver a frame, waiting while the consumer is still busy with the previous one
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` once the subscription has been dropped.
    pub async fn send(&self, frame: Frame) -> AppResult<()> {
        self.sender
            .send(frame)
            .await
            .map_err(|_| AppError::new(ErrorCode::ResourceUnavailable, "frame subscriber has gone away"))
    }

    /// Deliver a frame only if the consumer is ready, dropping it otherwise.
    ///
    /// Camera callbacks should use this: a late frame is worth less than the
    /// next one, and the tracker must never fall behind a backlog.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` once the subscription has been dropped.
    pub fn try_send(&self, frame: Frame) -> AppResult<bool> {
        match self.sender.try_send(frame) {
            Ok(()) => Ok(true),
            Err(mpsc::error::TrySendError::Full(_)) => Ok(false),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(AppError::new(
                ErrorCode::ResourceUnavailable,
                "frame subscriber has gone away",
            )),
        }
    }

    /// Whether the consuming side is gone
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Push-based source fed through a [`FrameSender`]
#[derive(Debug)]
pub struct ChannelFrameSource {
    receiver: mpsc::Receiver<Frame>,
}

impl ChannelFrameSource {
    /// Connected sender/source pair with room for a single pending frame
    #[must_use]
    pub fn new() -> (FrameSender, Self) {
        let (sender, receiver) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
        (FrameSender { sender }, Self { receiver })
    }
}

impl FrameSource for ChannelFrameSource {
    fn subscribe(self) -> Subscription {
        Subscription::new(ReceiverStream::new(self.receiver))
    }
}

/// One line of a recorded session
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedFrame {
    /// Capture timestamp in milliseconds
    pub timestamp_ms: u64,
    /// Normalized landmarks in slot order
    pub landmarks: Vec<Landmark>,
}

impl RecordedFrame {
    /// Scale into a `width` x `height` pixel frame
    #[must_use]
    pub fn into_frame(self, width: u32, height: u32) -> Frame {
        Frame::from_normalized(&self.landmarks, width, height, self.timestamp_ms)
    }
}

/// Parse one replay line into a pixel-space frame
///
/// # Errors
///
/// Returns `InvalidFormat` if the line is not a valid recorded frame.
pub fn parse_recorded_frame(line: &str, width: u32, height: u32) -> AppResult<Frame> {
    let recorded: RecordedFrame = serde_json::from_str(line)
        .map_err(|e| AppError::invalid_format(format!("unreadable recorded frame: {e}")).with_source(e))?;
    Ok(recorded.into_frame(width, height))
}

/// Replays a recorded session from a JSON-lines file
#[derive(Debug)]
pub struct JsonLinesFrameSource {
    path: PathBuf,
    reader: BufReader<File>,
    width: u32,
    height: u32,
}

impl JsonLinesFrameSource {
    /// Open a recording for replay onto a `width` x `height` surface
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` or `StorageError` if the file cannot be opened.
    pub async fn open(path: impl AsRef<Path>, width: u32, height: u32) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await.map_err(|e| {
            let err = AppError::from(e);
            AppError::new(err.code, format!("{}: {}", path.display(), err.message))
        })?;
        Ok(Self {
            path,
            reader: BufReader::new(file),
            width,
            height,
        })
    }
}

impl FrameSource for JsonLinesFrameSource {
    fn subscribe(self) -> Subscription {
        let Self {
            path,
            reader,
            width,
            height,
        } = self;
        Subscription::new(stream! {
            let mut lines = reader.lines();
            let mut line_number = 0_usize;
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        line_number += 1;
                        if line.trim().is_empty() {
                            continue;
                        }
                        match parse_recorded_frame(&line, width, height) {
                            Ok(frame) => yield frame,
                            Err(e) => warn!(
                                path = %path.display(),
                                line = line_number,
                                error = %e,
                                "skipping unreadable frame"
                            ),
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "frame replay aborted");
                        break;
                    }
                }
            }
        })
    }
}
