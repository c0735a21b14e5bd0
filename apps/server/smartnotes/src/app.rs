//! Start-up wiring: config, key, prompts, upstream client, server.

use crate::error::SmartnotesError;

use relay_core::config::{ApiKeySource, PromptBook, RelayConfig, load_api_key};
use relay_core::llm_client::LlmClient;
use relay_core::relay::Relay;
use relay_core::server::{RelayServerHandle, start_relay_server};

use std::path::Path;

use log::{info, warn};

/// A running relay and the settings it was started with.
pub struct Running {
    pub config: RelayConfig,
    pub api_key_source: ApiKeySource,
    pub handle: RelayServerHandle,
}

/// Load everything from `config_dir` and start serving.
///
/// A missing API key only warns; the server still starts and serves the
/// editor, and `/analyze` fails until a key is configured.
///
/// # Errors
///
/// Returns [`SmartnotesError`] if the config is corrupt, the upstream URL is
/// unusable, or the listen address cannot be bound.
pub async fn start(config_dir: &Path) -> Result<Running, SmartnotesError> {
    let mut config = RelayConfig::load(config_dir)?;
    config.apply_env_overrides()?;
    config.validate()?;

    let api_key = load_api_key(&config.api_key_env);
    if api_key.is_missing() {
        warn!(
            "Starting without {}; /analyze will fail until it is set",
            config.api_key_env
        );
    }
    let api_key_source = api_key.source.clone();

    let prompts = PromptBook::load(config_dir)?;

    let llm = LlmClient::new(&config.upstream, api_key.key)?;
    info!("Upstream: {} (model {})", llm.endpoint(), llm.model());

    let relay = Relay::new(llm, prompts);
    let handle = start_relay_server(&config.server, relay).await?;

    Ok(Running {
        config,
        api_key_source,
        handle,
    })
}
