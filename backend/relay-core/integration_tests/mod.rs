mod analyze;
mod env;
mod helpers;
mod llm_client;
