use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::util::progress::{Progress, ProgressSnapshot};

/// Shared handle for cancelling a running search and watching its progress.
///
/// Clones share state, so one clone can be handed to a watchdog thread while
/// another drives the search. Cancellation is cooperative: the search checks
/// the flag between root candidates and every
/// [`SearchControl::CHECK_INTERVAL`] backtracking steps.
#[derive(Clone, Debug, Default)]
pub struct SearchControl {
    cancelled: Arc<AtomicBool>,
    progress: Arc<Progress>,
}

impl SearchControl {
    pub const CHECK_INTERVAL: u64 = 1024;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.progress.snapshot()
    }
}

/// Outcome of a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// Occurrences found before the search ended.
    pub occurrences: u64,
    /// Whether the search stopped early because it was cancelled.
    pub cancelled: bool,
}

impl SearchSummary {
    /// Combine the summaries of two disjoint root ranges.
    #[must_use]
    pub fn merge(self, other: SearchSummary) -> SearchSummary {
        SearchSummary {
            occurrences: self.occurrences + other.occurrences,
            cancelled: self.cancelled || other.cancelled,
        }
    }
}
