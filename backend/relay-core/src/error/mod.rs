pub mod config;
pub mod llm_client;
pub mod relay;
pub mod server;

pub use config::ConfigError;
pub use llm_client::LlmClientError;
pub use relay::RelayError;
pub use server::ServerError;
