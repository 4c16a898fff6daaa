use serde::{Deserialize, Serialize};

/// Counters for one batch run, owned by the run and returned to the caller.
/// `queued` is fixed before processing begins; `processed` counts only the
/// files that actually produced an output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub queued: usize,
    pub processed: usize,
}

/// Emitted after each unit completes, whether or not it produced output.
/// Consumed by whichever presentation layer is in use.
#[derive(Debug, Clone)]
pub struct ProgressEvent<'a> {
    pub queued: usize,
    pub processed: usize,
    pub file: &'a str,
}
