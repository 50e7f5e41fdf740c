//! Search client core: the HTTP transport for the remote search endpoint and
//! the coordinator that keeps exactly one search request current.

pub mod config;
mod coordinator;
pub mod transport;

pub use config::{load_settings, ClientSettings, SettingsError};
pub use coordinator::{RequestCoordinator, RequestHandle, RequestId, Submission, UiState};
pub use transport::{HttpSearchTransport, SearchTransport};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
