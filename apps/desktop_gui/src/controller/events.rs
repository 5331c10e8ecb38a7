//! Events flowing from the backend worker into the app's reducer.

use shared::domain::PersonRecord;

pub enum UiEvent {
    /// Whole-roster replacement from a completed fetch. Dropped by the
    /// reducer when `generation` no longer matches the current fetch.
    RosterLoaded {
        generation: u64,
        persons: Vec<PersonRecord>,
    },
    /// Fetch failed; diagnostics are already in the log and the roster
    /// keeps its previous value.
    FetchFailed { generation: u64 },
    /// The remote store confirmed the append with its sentinel message;
    /// `person` is the submitted entry after coercion.
    PersonAppended { person: PersonRecord },
    /// The store answered with something other than the sentinel.
    AppendRejected { message: String },
    /// The append never got an application-level answer.
    AppendFailed { reason: String },
    /// The worker could not start; nothing will ever be fetched.
    BackendGone { reason: String },
}
