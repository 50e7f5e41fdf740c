//! Backend commands queued from UI to backend worker.

use shared::domain::SearchQuery;

pub enum BackendCommand {
    /// Supersedes any search still in flight.
    Search { query: SearchQuery },
}
