pub mod config;
pub mod error;
pub mod llm_client;
pub mod relay;
pub mod server;

#[cfg(test)]
mod tests;

pub const APP_NAME: &str = "smartnotes";
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "web";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_UPSTREAM_HOST: &str = "api.groq.com";
pub const DEFAULT_UPSTREAM_BASE_URL: &str =
    const_format::concatcp!("https://", DEFAULT_UPSTREAM_HOST, "/openai/v1");
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant for note-taking.";
