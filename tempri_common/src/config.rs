//! Search configuration shared by the loader, the matcher and the CLI.
//!
//! ```ignore
//! use tempri_common::{Config, Delta};
//! let cfg = Config::builder().delta(Delta::Within(5)).undirected().build();
//! ```

use std::fmt;
use std::ops::Bound;

use crate::graph::{TimeWindow, Timestamp};

/// Maximum allowed span between the earliest and latest timestamp of an
/// occurrence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Delta {
    /// No temporal constraint.
    #[default]
    Unbounded,
    /// `max(ts) - min(ts) <= value`.
    Within(Timestamp),
}

impl Delta {
    /// `None` means no constraint.
    #[must_use]
    pub const fn from_option(value: Option<Timestamp>) -> Self {
        match value {
            Some(v) => Delta::Within(v),
            None => Delta::Unbounded,
        }
    }

    #[must_use]
    pub const fn value(self) -> Option<Timestamp> {
        match self {
            Delta::Unbounded => None,
            Delta::Within(v) => Some(v),
        }
    }

    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Delta::Unbounded)
    }

    /// Whether a set of timestamps spanning `span` satisfies the constraint.
    #[must_use]
    pub const fn admits(self, span: Timestamp) -> bool {
        match self {
            Delta::Unbounded => true,
            Delta::Within(v) => span <= v,
        }
    }

    /// Timestamps in `(t, t + delta]`.
    #[must_use]
    pub const fn after(self, t: Timestamp) -> TimeWindow {
        let upper = match self {
            Delta::Unbounded => Bound::Unbounded,
            Delta::Within(v) => Bound::Included(t.saturating_add(v)),
        };
        TimeWindow::new(Bound::Excluded(t), upper)
    }

    /// Timestamps in `[t - delta, t)`.
    #[must_use]
    pub const fn before(self, t: Timestamp) -> TimeWindow {
        let lower = match self {
            Delta::Unbounded => Bound::Unbounded,
            Delta::Within(v) => Bound::Included(t.saturating_sub(v)),
        };
        TimeWindow::new(lower, Bound::Excluded(t))
    }

    /// How far the current `[min, max]` span may still be widened.
    #[must_use]
    pub const fn slack(self, min: Timestamp, max: Timestamp) -> Option<Timestamp> {
        match self {
            Delta::Unbounded => None,
            Delta::Within(v) => Some(v.saturating_sub(max.saturating_sub(min))),
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delta::Unbounded => f.write_str("inf"),
            Delta::Within(v) => write!(f, "{v}"),
        }
    }
}

/// Global search configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// Temporal window for occurrences.
    pub delta: Delta,
    /// Whether edges are directed.
    pub directed: bool,
    /// Whether each occurrence is materialized and printed.
    pub dump: bool,
    /// Whether the search fans out over root candidates in parallel.
    pub parallel: bool,
}

impl Config {
    /// Start from [`Config::default`] and override fields one by one.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delta: Delta::Unbounded,
            directed: true,
            dump: false,
            parallel: false,
        }
    }
}

/// Builder for [`Config`], created by [`Config::builder`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the temporal window.
    #[must_use]
    pub fn delta(mut self, delta: Delta) -> Self {
        self.config.delta = delta;
        self
    }

    /// Shorthand for `delta(Delta::Within(value))`.
    #[must_use]
    pub fn within(self, value: Timestamp) -> Self {
        self.delta(Delta::Within(value))
    }

    /// Set whether edges are directed.
    #[must_use]
    pub fn directed(mut self, directed: bool) -> Self {
        self.config.directed = directed;
        self
    }

    #[must_use]
    pub fn undirected(self) -> Self {
        self.directed(false)
    }

    /// Set whether occurrences are materialized and printed.
    #[must_use]
    pub fn dump(mut self, dump: bool) -> Self {
        self.config.dump = dump;
        self
    }

    /// Set whether the search runs over root candidates in parallel.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
