//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.aspectra.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `ASPECTRA_SERVER_URL`, `ASPECTRA_API_KEY`,
//!    or legacy `ABSA_API_KEY`
//! 4. **Command-line arguments** – `--server-url`/`-s`, `--review`/`-r`, ...
//!
//! # Configuration File
//!
//! ```toml
//! server_url = "http://127.0.0.1:8000"
//! checkpoint = "multilingual"
//! device = "auto"
//! log_file = "aspectra.log"
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::model::{DeviceSelection, HttpExtractorConfig};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_CHECKPOINT: &str = "multilingual";
const DEFAULT_DEVICE: &str = "auto";
const LEGACY_API_KEY_ENV: &str = "ABSA_API_KEY";

/// Operation mode determined by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Analyse the configured review once and print the result.
    OneShot,
    /// Launch the interactive terminal interface.
    Interactive,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use aspectra::AspectraConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = AspectraConfig::load().expect("failed to load configuration");
/// let extractor = config.extractor_config().expect("valid model settings");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "ASPECTRA",
    discovery(
        dotfile_name = ".aspectra.toml",
        config_file_name = "aspectra.toml",
        app_name = "aspectra"
    )
)]
pub struct AspectraConfig {
    /// Base URL of the ABSA inference runtime.
    ///
    /// Can be provided via:
    /// - CLI: `--server-url <URL>` or `-s <URL>`
    /// - Environment: `ASPECTRA_SERVER_URL`
    /// - Config file: `server_url = "..."`
    #[ortho_config(cli_short = 's')]
    pub server_url: String,

    /// Pretrained checkpoint to load.
    ///
    /// Defaults to the multilingual aspect-term-extraction checkpoint.
    #[ortho_config(cli_short = 'c')]
    pub checkpoint: String,

    /// Hardware preference: `auto` prefers a GPU when present, `cpu` never
    /// uses one.
    #[ortho_config(cli_short = 'd')]
    pub device: String,

    /// Bearer token forwarded to the inference runtime.
    ///
    /// Can be provided via:
    /// - CLI: `--api-key <KEY>`
    /// - Environment: `ASPECTRA_API_KEY` or `ABSA_API_KEY` (legacy)
    /// - Config file: `api_key = "..."`
    #[ortho_config()]
    pub api_key: Option<String>,

    /// HTTP timeout in seconds. When unset, a slow prediction blocks until
    /// the runtime answers.
    #[ortho_config()]
    pub timeout_seconds: Option<u64>,

    /// Review text to analyse once without launching the TUI.
    #[ortho_config(cli_short = 'r')]
    pub review: Option<String>,

    /// Prints the raw model output as JSON in one-shot mode.
    ///
    /// Note: Environment variable `ASPECTRA_RAW` is not supported because
    /// `ortho_config` does not load boolean values from the environment.
    #[ortho_config()]
    pub raw: bool,

    /// Path of the log file. Logs go to stderr when unset.
    #[ortho_config(cli_short = 'l')]
    pub log_file: Option<String>,
}

impl Default for AspectraConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            checkpoint: DEFAULT_CHECKPOINT.to_owned(),
            device: DEFAULT_DEVICE.to_owned(),
            api_key: None,
            timeout_seconds: None,
            review: None,
            raw: false,
            log_file: None,
        }
    }
}

impl AspectraConfig {
    /// Resolves the API key from configuration or the legacy `ABSA_API_KEY`
    /// environment variable.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(LEGACY_API_KEY_ENV).ok())
    }

    /// Parses the configured device preference.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] for unknown device names.
    pub fn device_selection(&self) -> Result<DeviceSelection, AnalysisError> {
        self.device
            .parse::<DeviceSelection>()
            .map_err(|error| AnalysisError::Configuration {
                message: error.to_string(),
            })
    }

    /// Builds the HTTP extractor configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] when the checkpoint is blank
    /// or the device preference is invalid.
    pub fn extractor_config(&self) -> Result<HttpExtractorConfig, AnalysisError> {
        if self.checkpoint.trim().is_empty() {
            return Err(AnalysisError::Configuration {
                message: "checkpoint must not be empty (use --checkpoint or -c)".to_owned(),
            });
        }

        Ok(
            HttpExtractorConfig::new(self.server_url.as_str(), self.checkpoint.trim())
                .with_device(self.device_selection()?)
                .with_api_key(self.resolve_api_key())
                .with_timeout(self.timeout_seconds.map(Duration::from_secs)),
        )
    }

    /// Determines the operation mode.
    ///
    /// Returns `OneShot` when a review is configured, `Interactive`
    /// otherwise.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.review.is_some() {
            OperationMode::OneShot
        } else {
            OperationMode::Interactive
        }
    }

    /// Returns the configured review or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] when no review is configured.
    pub fn require_review(&self) -> Result<&str, AnalysisError> {
        self.review
            .as_deref()
            .ok_or_else(|| AnalysisError::Configuration {
                message: "--review is required in one-shot mode".to_owned(),
            })
    }
}
