mod config;
mod extraction;
mod paths;
mod prompts;
