use crate::relay::Relay;

/// Shared by every handler. Immutable; cloned per request by axum.
#[derive(Clone)]
pub struct ServerState {
    pub relay: Relay,
}

impl ServerState {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }
}
