mod helpers;
mod relay_client;
mod session;
