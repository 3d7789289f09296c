// ABOUTME: Trainwave CLI - replays recorded landmark sessions through the repetition tracker
// ABOUTME: Lists supported exercises and optionally saves the final count to the exercise log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave
//!
//! Usage:
//! ```bash
//! # List supported exercises
//! trainwave-cli exercises
//!
//! # Count squats in a recorded session
//! trainwave-cli replay --input session.jsonl --exercise squats
//!
//! # Count and save to the exercise log (needs TRAINWAVE_API_BASE_URL)
//! trainwave-cli replay --input session.jsonl --exercise pushup --save
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use trainwave::{
    config::TrainwaveConfig,
    errors::{AppError, AppResult},
    logging::LoggingConfig,
    models::ExerciseKind,
};

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "trainwave-cli",
    about = "Trainwave repetition tracking CLI",
    long_about = "Replays recorded pose landmark sessions through the repetition tracker and reports the count."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List supported exercises and the joints each one reads
    Exercises,

    /// Replay a JSON-lines landmark recording and count repetitions
    Replay {
        /// Recording to replay, one frame per line
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Exercise id or label (defaults to TRAINWAVE_DEFAULT_EXERCISE)
        #[arg(long, short = 'e')]
        exercise: Option<ExerciseKind>,

        /// Frame width normalized landmarks are scaled to
        #[arg(long)]
        width: Option<u32>,

        /// Frame height normalized landmarks are scaled to
        #[arg(long)]
        height: Option<u32>,

        /// Landmarks below this confidence are ignored
        #[arg(long)]
        min_confidence: Option<f32>,

        /// Post the final count to the exercise log
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.verbose()
    } else {
        logging
    };
    logging
        .init()
        .map_err(|e| AppError::internal(format!("logging setup failed: {e}")))?;

    let config = TrainwaveConfig::from_env().map_err(|e| AppError::config(format!("{e:#}")))?;
    info!("Configuration: {}", config.summary());

    match cli.command {
        Command::Exercises => commands::exercises::list(),
        Command::Replay {
            input,
            exercise,
            width,
            height,
            min_confidence,
            save,
        } => {
            let options = commands::replay::ReplayOptions {
                input,
                exercise,
                width,
                height,
                min_confidence,
                save,
            };
            commands::replay::run(&config, &options).await?;
        }
    }

    Ok(())
}
