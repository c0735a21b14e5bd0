//! Provider API key loading from `.env` and the process environment.
//!
//! A missing key is not fatal: the relay still starts and upstream calls fail
//! with the provider's 401, which `/analyze` reports as a 500.

use common::RedactedApiKey;

use std::env;
use std::path::PathBuf;

use log::{debug, info, warn};

/// Where the key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Loaded into the environment from this `.env` file.
    DotEnv(PathBuf),
    /// Already present in the process environment.
    Environment,
    Missing,
}

#[derive(Debug)]
pub struct LoadedApiKey {
    pub key: RedactedApiKey,
    pub source: ApiKeySource,
}

impl LoadedApiKey {
    pub fn is_missing(&self) -> bool {
        self.source == ApiKeySource::Missing
    }
}

/// Load `.env` (cwd, then executable dir) and read `variable`.
///
/// Existing environment variables win over `.env` entries.
pub fn load_api_key(variable: &str) -> LoadedApiKey {
    let dotenv_path = try_load_dotenv();

    match env::var(variable) {
        Ok(value) if !value.trim().is_empty() => {
            let key = RedactedApiKey::new(value);
            let source = match dotenv_path {
                Some(path) => ApiKeySource::DotEnv(path),
                None => ApiKeySource::Environment,
            };
            info!("Found {} ({} chars)", variable, key.len());
            LoadedApiKey { key, source }
        }
        Ok(_) | Err(env::VarError::NotPresent) => {
            warn!("Warning: {} not set. Upstream requests will be rejected.", variable);
            LoadedApiKey {
                key: RedactedApiKey::default(),
                source: ApiKeySource::Missing,
            }
        }
        Err(env::VarError::NotUnicode(_)) => {
            warn!("{} contains invalid unicode, ignoring it", variable);
            LoadedApiKey {
                key: RedactedApiKey::default(),
                source: ApiKeySource::Missing,
            }
        }
    }
}

fn try_load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return Some(path);
    }

    let exe_dir = env::current_exe().ok()?.parent()?.to_path_buf();
    let env_path = exe_dir.join(".env");
    if !env_path.exists() {
        debug!("No .env file found - using process environment only");
        return None;
    }

    match dotenvy::from_path(&env_path) {
        Ok(()) => {
            info!("Loaded .env from: {:?}", env_path);
            Some(env_path)
        }
        Err(e) => {
            warn!("Failed to parse .env at {:?}: {}", env_path, e);
            None
        }
    }
}
