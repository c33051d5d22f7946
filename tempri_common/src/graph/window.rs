use std::collections::btree_map::Range;
use std::ops::Bound;

use super::{Neighbours, TimeIndex, Timestamp};

/// A range of timestamps used to slice a [`TimeIndex`].
///
/// Unlike a raw `BTreeMap::range`, an empty or inverted window simply yields
/// nothing instead of panicking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    pub lower: Bound<Timestamp>,
    pub upper: Bound<Timestamp>,
}

impl TimeWindow {
    #[must_use]
    pub const fn new(lower: Bound<Timestamp>, upper: Bound<Timestamp>) -> Self {
        Self { lower, upper }
    }

    /// Every timestamp.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// Only `t`.
    #[must_use]
    pub const fn exactly(t: Timestamp) -> Self {
        Self::new(Bound::Included(t), Bound::Included(t))
    }

    /// The open interval `(lower, upper)`.
    #[must_use]
    pub const fn strictly_between(lower: Timestamp, upper: Timestamp) -> Self {
        Self::new(Bound::Excluded(lower), Bound::Excluded(upper))
    }

    /// Whether the window can contain at least one timestamp.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match (self.lower, self.upper) {
            (Bound::Excluded(s), Bound::Excluded(e)) => s.checked_add(1).is_some_and(|s| s < e),
            (Bound::Included(s), Bound::Excluded(e)) | (Bound::Excluded(s), Bound::Included(e)) => {
                s < e
            }
            (Bound::Included(s), Bound::Included(e)) => s <= e,
            _ => true,
        }
    }

    #[must_use]
    pub fn contains(&self, t: Timestamp) -> bool {
        let above = match self.lower {
            Bound::Included(s) => t >= s,
            Bound::Excluded(s) => t > s,
            Bound::Unbounded => true,
        };
        let below = match self.upper {
            Bound::Included(e) => t <= e,
            Bound::Excluded(e) => t < e,
            Bound::Unbounded => true,
        };
        above && below
    }

    /// Entries of `index` whose timestamp falls in the window.
    pub fn slice<'a>(
        &self,
        index: &'a TimeIndex,
    ) -> std::iter::Flatten<std::option::IntoIter<Range<'a, Timestamp, Neighbours>>> {
        self.is_valid()
            .then(|| index.range((self.lower, self.upper)))
            .into_iter()
            .flatten()
    }
}
