//! Shared primitives for SmartNotes.
//!
//! Nothing in here knows about notes, prompts or HTTP routing. These are the
//! building blocks every other crate reaches for:
//!
//! - **models**: request/response shapes exchanged with the relay
//! - **relay-core**: the `/analyze` relay and its upstream LLM client
//! - **editor-core**: the headless editor and suggestion lifecycle
//! - **smartnotes**: the server binary wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_key;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;
