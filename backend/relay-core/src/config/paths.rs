//! Where SmartNotes keeps its config and log files.
//!
//! Lookup order, per directory:
//! 1. Environment override (`SMARTNOTES_CONFIG_DIR`, `SMARTNOTES_LOG_DIR`)
//! 2. Platform directory via `dirs`
//! 3. Relative to the working directory

use crate::APP_NAME;

use std::env;
use std::path::PathBuf;

use log::debug;

pub const CONFIG_DIR_ENV: &str = "SMARTNOTES_CONFIG_DIR";
pub const LOG_DIR_ENV: &str = "SMARTNOTES_LOG_DIR";

const LOG_SUBDIR: &str = "logs";

/// How a path was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    EnvVar,
    PlatformDefault,
    WorkingDirectory,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "environment override"),
            PathSource::PlatformDefault => write!(f, "platform default"),
            PathSource::WorkingDirectory => write!(f, "working directory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmartnotesPaths {
    pub config_dir: PathBuf,
    pub config_source: PathSource,
    pub log_dir: PathBuf,
    pub log_source: PathSource,
}

impl SmartnotesPaths {
    /// Resolve both directories. Never fails; the working directory is the last resort.
    pub fn detect() -> Self {
        let (config_dir, config_source) = resolve(
            CONFIG_DIR_ENV,
            || dirs::config_dir().map(|dir| dir.join(APP_NAME)),
            PathBuf::from("."),
        );

        let (log_dir, log_source) = resolve(
            LOG_DIR_ENV,
            || dirs::data_local_dir().map(|dir| dir.join(APP_NAME).join(LOG_SUBDIR)),
            PathBuf::from(LOG_SUBDIR),
        );

        debug!(
            "Resolved config dir {} ({}), log dir {} ({})",
            config_dir.display(),
            config_source,
            log_dir.display(),
            log_source
        );

        Self {
            config_dir,
            config_source,
            log_dir,
            log_source,
        }
    }
}

fn resolve(
    variable: &str,
    platform: impl FnOnce() -> Option<PathBuf>,
    fallback: PathBuf,
) -> (PathBuf, PathSource) {
    if let Ok(value) = env::var(variable) {
        if !value.trim().is_empty() {
            return (PathBuf::from(value.trim()), PathSource::EnvVar);
        }
    }

    match platform() {
        Some(dir) => (dir, PathSource::PlatformDefault),
        None => (fallback, PathSource::WorkingDirectory),
    }
}
