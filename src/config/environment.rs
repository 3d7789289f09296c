// ABOUTME: Environment configuration management for capture, tracking, and persistence settings
// ABOUTME: Parses environment variables into typed config and rejects malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwave

//! Environment-based configuration
//!
//! There are no config files. Every setting has a default, and a set but
//! malformed variable is an error, never a silent fallback.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::constants::{capture, env_config, persistence};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::ExerciseKind;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Capture surface and landmark gating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    /// Pixel width normalized landmarks are scaled to
    pub frame_width: u32,
    /// Pixel height normalized landmarks are scaled to
    pub frame_height: u32,
    /// Landmarks below this confidence are treated as missing
    pub min_confidence: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_width: capture::DEFAULT_FRAME_WIDTH,
            frame_height: capture::DEFAULT_FRAME_HEIGHT,
            min_confidence: capture::DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl CaptureConfig {
    /// Reject zero-sized surfaces and confidences outside `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` describing the offending field.
    pub fn validate(&self) -> AppResult<()> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(AppError::out_of_range(format!(
                "frame size must be non-zero, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(AppError::out_of_range(format!(
                "min confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

/// Exercise log backend connection
#[derive(Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// API root, e.g. `https://api.example.com`
    pub base_url: Url,
    /// Bearer token sent with each request
    pub api_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl PersistenceConfig {
    /// Config for `base_url` with no token and the default timeout
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
            timeout: Duration::from_secs(persistence::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Full URL of the exercise log endpoint
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the base URL cannot take a path (e.g. `mailto:`).
    pub fn exercises_endpoint(&self) -> AppResult<Url> {
        self.base_url
            .join(persistence::EXERCISES_PATH)
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ConfigInvalid,
                    format!("invalid exercise log URL: {e}"),
                )
                .with_source(e)
            })
    }
}

impl fmt::Debug for PersistenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TrainwaveConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Capture surface and landmark gating
    pub capture: CaptureConfig,
    /// Exercise selected when none is given explicitly
    pub default_exercise: ExerciseKind,
    /// Exercise log backend; `None` disables persistence
    pub persistence: Option<PersistenceConfig>,
}

impl Default for TrainwaveConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            capture: CaptureConfig::default(),
            default_exercise: ExerciseKind::default(),
            persistence: None,
        }
    }
}

impl TrainwaveConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set but cannot be parsed, or if
    /// the resulting configuration fails validation.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = optional_var(env_config::ENVIRONMENT)?
            .map(|raw| Environment::from_str_or_default(&raw))
            .unwrap_or_default();

        let capture = CaptureConfig {
            frame_width: parse_var_or(env_config::FRAME_WIDTH, capture::DEFAULT_FRAME_WIDTH)?,
            frame_height: parse_var_or(env_config::FRAME_HEIGHT, capture::DEFAULT_FRAME_HEIGHT)?,
            min_confidence: parse_var_or(
                env_config::MIN_CONFIDENCE,
                capture::DEFAULT_MIN_CONFIDENCE,
            )?,
        };

        let default_exercise =
            parse_var_or(env_config::DEFAULT_EXERCISE, ExerciseKind::default())?;

        let persistence = match optional_var(env_config::API_BASE_URL)? {
            Some(raw) => {
                let base_url = Url::parse(&raw)
                    .with_context(|| format!("Invalid {} value '{raw}'", env_config::API_BASE_URL))?;
                Some(PersistenceConfig {
                    base_url,
                    api_token: optional_var(env_config::API_TOKEN)?,
                    timeout: Duration::from_secs(parse_var_or(
                        env_config::API_TIMEOUT_SECS,
                        persistence::DEFAULT_TIMEOUT_SECS,
                    )?),
                })
            }
            None => None,
        };

        let config = Self {
            environment,
            capture,
            default_exercise,
            persistence,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.capture
            .validate()
            .map_err(|e| anyhow!("Invalid capture configuration: {e}"))?;

        if let Some(persistence) = &self.persistence {
            if persistence.timeout.is_zero() {
                return Err(anyhow!("{} must be greater than zero", env_config::API_TIMEOUT_SECS));
            }
            if persistence.api_token.is_none() {
                warn!("Exercise log API configured without a token; requests will be anonymous");
            }
            if self.environment.is_production() && persistence.base_url.scheme() != "https" {
                return Err(anyhow!(
                    "{} must use https in production",
                    env_config::API_BASE_URL
                ));
            }
        }

        Ok(())
    }

    /// One-line description safe for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "env={} capture={}x{} min_confidence={} default_exercise={} persistence={}",
            self.environment,
            self.capture.frame_width,
            self.capture.frame_height,
            self.capture.min_confidence,
            self.default_exercise,
            self.persistence
                .as_ref()
                .map_or("disabled", |p| p.base_url.as_str()),
        )
    }
}

/// Value of `key`, treating unset and blank the same
fn optional_var(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_owned())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(anyhow!("Invalid {key} value: {e}")),
    }
}

/// Parse `key` if set, else `default`
fn parse_var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional_var(key)?.map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
    })
}
