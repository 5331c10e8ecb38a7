use reqwest::StatusCode;
use thiserror::Error;

/// Remote store failure taxonomy. `Rejected` is the only application-level
/// failure: the write went through at the transport level but the store's
/// message payload was not the success sentinel.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport failure talking to the remote store: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote store returned status {0}")]
    Status(StatusCode),
    #[error("could not decode remote store payload: {0}")]
    Payload(#[source] reqwest::Error),
    #[error("remote store rejected the write: {message}")]
    Rejected { message: String },
}

impl RemoteError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
