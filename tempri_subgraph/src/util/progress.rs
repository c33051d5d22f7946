use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the search as it goes; safe to read from another
/// thread while the search runs.
#[derive(Debug, Default)]
pub struct Progress {
    total_roots: AtomicU64,
    scanned_roots: AtomicU64,
    occurrences: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total_roots: u64,
    pub scanned_roots: u64,
    pub occurrences: u64,
}

impl Progress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the number of root candidates the search will visit.
    pub fn add_total_roots(&self, by: u64) {
        self.total_roots.fetch_add(by, Ordering::Relaxed);
    }

    pub fn inc_scanned_roots(&self, by: u64) {
        self.scanned_roots.fetch_add(by, Ordering::Relaxed);
    }

    pub fn inc_occurrences(&self, by: u64) {
        self.occurrences.fetch_add(by, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total_roots: self.total_roots.load(Ordering::Relaxed),
            scanned_roots: self.scanned_roots.load(Ordering::Relaxed),
            occurrences: self.occurrences.load(Ordering::Relaxed),
        }
    }
}

impl ProgressSnapshot {
    /// Fraction of root candidates visited, in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total_roots == 0 {
            1.0
        } else {
            (self.scanned_roots as f64 / self.total_roots as f64).min(1.0)
        }
    }
}
