//! Wall-clock timers for the matcher phases.
//!
//! With the `profiling` feature, every [`Timer`] adds its lifetime to a
//! process-wide table keyed by phase name and [`report`] logs the table.
//! Without the feature the timer is a zero-sized no-op.

/// One row of the profile table.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseStats {
    pub phase: &'static str,
    pub calls: u64,
    pub total_nanos: u128,
}

impl PhaseStats {
    #[must_use]
    pub fn mean_nanos(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.total_nanos as f64 / self.calls as f64
        }
    }
}

#[cfg(feature = "profiling")]
mod enabled {
    use std::sync::OnceLock;
    use std::time::Instant;

    use dashmap::DashMap;

    use super::PhaseStats;

    static PHASES: OnceLock<DashMap<&'static str, (u64, u128)>> = OnceLock::new();

    fn phases() -> &'static DashMap<&'static str, (u64, u128)> {
        PHASES.get_or_init(DashMap::new)
    }

    /// Records the time between its creation and its drop under `phase`.
    pub struct Timer {
        phase: &'static str,
        started: Instant,
    }

    impl Timer {
        #[inline]
        #[must_use]
        pub fn new(phase: &'static str) -> Self {
            Self {
                phase,
                started: Instant::now(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let elapsed = self.started.elapsed().as_nanos();
            let mut slot = phases().entry(self.phase).or_insert((0, 0));
            slot.0 += 1;
            slot.1 += elapsed;
        }
    }

    /// All phases, slowest total first.
    pub fn snapshot() -> Vec<PhaseStats> {
        let mut rows: Vec<PhaseStats> = phases()
            .iter()
            .map(|kv| PhaseStats {
                phase: kv.key(),
                calls: kv.value().0,
                total_nanos: kv.value().1,
            })
            .collect();
        rows.sort_by(|a, b| b.total_nanos.cmp(&a.total_nanos));
        rows
    }

    pub fn reset() {
        phases().clear();
    }
}

#[cfg(not(feature = "profiling"))]
mod disabled {
    use super::PhaseStats;

    #[derive(Clone, Copy)]
    pub struct Timer;

    impl Timer {
        #[inline]
        #[must_use]
        pub fn new(_: &'static str) -> Self {
            Timer
        }
    }

    pub fn snapshot() -> Vec<PhaseStats> {
        Vec::new()
    }

    pub fn reset() {}
}

#[cfg(feature = "profiling")]
pub use enabled::*;

#[cfg(not(feature = "profiling"))]
pub use disabled::*;

/// Log the profile table at `info` level.
pub fn report() {
    let rows = snapshot();
    if rows.is_empty() {
        return;
    }
    tracing::info!("==== tempri_subgraph phase profile ====");
    for row in rows {
        tracing::info!(
            "{:<40} calls={:<10} total={:>10.3} ms mean={:>12.1} ns",
            row.phase,
            row.calls,
            row.total_nanos as f64 / 1_000_000.0,
            row.mean_nanos()
        );
    }
}
