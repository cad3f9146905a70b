//! Runtime configuration for the vectorization trigger.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{error::TriggerError, pipeline::Mode};

/// Fixed tag identifying this tool in shared log files.
pub const SERVICE_TAG: &str = "trigger-vectorization-pipeline";

const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_FILTER: &str = "info";

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Local execution: stdout only.
    Console,
    /// Container execution: append to shared files under this directory.
    File { dir: PathBuf },
}

pub fn log_file_in(dir: &Path) -> PathBuf {
    dir.join(format!("{SERVICE_TAG}.log"))
}

pub fn error_file_in(dir: &Path) -> PathBuf {
    dir.join(format!("{SERVICE_TAG}_errors.log"))
}

/// Application configuration resolved from `.env` and the process environment.
///
/// `PRODUCTION_MODE` is kept raw and only interpreted by [`Settings::mode`],
/// so a bad value is reported through the log sink rather than before it exists.
#[derive(Debug, Clone)]
pub struct Settings {
    pub production_mode: Option<String>,
    pub log_target: LogTarget,
    /// `EnvFilter` directive, `RUST_LOG` or `info`.
    pub log_filter: String,
}

impl Settings {
    /// Load configuration from `.env`, the environment and the container probe.
    pub fn load() -> Result<Self, TriggerError> {
        dotenvy::dotenv().ok();
        let in_container = Path::new("/.dockerenv").exists()
            || env::var("RUNNING_IN_CONTAINER")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(false);
        Self::from_lookup(|key| env::var(key).ok(), in_container)
    }

    /// Resolve settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F, in_container: bool) -> Result<Self, TriggerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let production_mode = lookup("PRODUCTION_MODE").filter(|v| !v.trim().is_empty());
        let log_dir = lookup("LOG_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        let log_target = match lookup("LOG_TARGET")
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .as_deref()
        {
            None if in_container => LogTarget::File { dir: log_dir },
            None | Some("console") => LogTarget::Console,
            Some("file") => LogTarget::File { dir: log_dir },
            Some(other) => {
                return Err(TriggerError::validation(format!(
                    "LOG_TARGET must be 'console' or 'file', got {other:?}"
                )))
            }
        };

        let log_filter = lookup("RUST_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            production_mode,
            log_target,
            log_filter,
        })
    }

    /// Development unless `PRODUCTION_MODE` is truthy.
    pub fn mode(&self) -> Result<Mode, TriggerError> {
        let Some(raw) = self.production_mode.as_deref() else {
            return Ok(Mode::Development);
        };
        match parse_bool(raw) {
            Some(true) => Ok(Mode::Production),
            Some(false) => Ok(Mode::Development),
            None => Err(TriggerError::validation(format!(
                "PRODUCTION_MODE must be a boolean, got {raw:?}"
            ))),
        }
    }
}

/// Interpret the usual spellings of an environment boolean.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
