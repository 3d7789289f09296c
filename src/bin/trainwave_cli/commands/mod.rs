// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave
// ABOUTME: Re-exports command modules for trainwave-cli
// ABOUTME: Provides access to exercise listing and recording replay commands

pub mod exercises;
pub mod replay;
