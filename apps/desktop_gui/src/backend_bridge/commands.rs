//! Commands queued from the UI thread to the backend worker.

use shared::protocol::AppendRequest;

pub enum BackendCommand {
    /// Re-read the whole roster. `generation` tags the eventual response so
    /// the UI can drop replies that raced a newer fetch.
    FetchRoster { generation: u64 },
    /// Append one submitted entry to the remote store.
    AppendPerson { request: AppendRequest },
}
