// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave
// ABOUTME: Re-exports helper modules for trainwave-cli
// ABOUTME: Provides access to display formatting utilities

pub mod display;
