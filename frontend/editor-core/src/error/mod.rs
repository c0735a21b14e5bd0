pub mod editor;
pub mod relay_client;

pub use editor::EditorError;
pub use relay_client::RelayClientError;
